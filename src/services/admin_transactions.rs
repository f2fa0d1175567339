//! Back-office transaction screens.

use crate::domain::transaction::{
    Transaction, TransactionField, TransactionStatus, UpdateTransactionStatus,
};
use crate::domain::user::UserRole;
use crate::dto::transactions::{AdminTransactionsPageData, StatusTab, TransactionDetailPageData};
use crate::forms::transactions::TransactionStatusForm;
use crate::listing::{ListParams, QueryState};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{TransactionReader, TransactionWriter};
use crate::services::transactions::{TRANSACTION_VIEW, parse_transaction_id};
use crate::services::{ServiceError, ServiceResult, ensure_role, failed, universe};

const BASE: &str = "/dashboard/transaksi";

/// Builds one tab per known status. Counts cover every transaction and
/// ignore the search text.
pub fn status_tabs(
    transactions: &[Transaction],
    state: &QueryState<TransactionField>,
) -> Vec<StatusTab> {
    TransactionStatus::KNOWN
        .iter()
        .map(|status| {
            let mut target = state.clone();
            target.set_selected_filter(status.as_str());
            target.set_page(1, 1);
            StatusTab {
                value: status.as_str().to_string(),
                label: status.label(),
                count: transactions.iter().filter(|t| &t.status == status).count(),
                href: target.href(BASE),
                active: state.selected_filter() == Some(status.as_str()),
            }
        })
        .collect()
}

/// Lists every transaction under the selected status tab. Without a tab the
/// pending transactions are shown.
pub async fn load_transactions<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ListParams,
) -> ServiceResult<AdminTransactionsPageData>
where
    R: TransactionReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let fetched = universe(
        repo.list_all_transactions(&user.token).await,
        "transactions",
    )?;

    let mut state = QueryState::from_params(params);
    if state.selected_filter().is_none() {
        state.set_selected_filter(TransactionStatus::Pending.as_str());
    }

    let list = TRANSACTION_VIEW.render(&fetched.data, &mut state, BASE);
    let tabs = status_tabs(&fetched.data, &state);

    Ok(AdminTransactionsPageData {
        tabs,
        list,
        error: fetched.error,
    })
}

pub async fn load_transaction<R>(
    repo: &R,
    user: &AuthenticatedUser,
    transaction_id: &str,
) -> ServiceResult<TransactionDetailPageData>
where
    R: TransactionReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let id = parse_transaction_id(transaction_id)?;

    let transaction = repo
        .get_transaction(&user.token, &id)
        .await
        .map_err(failed("load transaction"))?
        .ok_or(ServiceError::NotFound)?;

    Ok(TransactionDetailPageData {
        can_cancel: false,
        transaction,
    })
}

/// Confirms or rejects a transaction.
pub async fn update_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    transaction_id: &str,
    form: TransactionStatusForm,
) -> ServiceResult<()>
where
    R: TransactionWriter + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let id = parse_transaction_id(transaction_id)?;
    let update = UpdateTransactionStatus::try_from(form)?;

    repo.update_transaction_status(&user.token, &id, &update)
        .await
        .map_err(failed("update transaction status"))?;

    log::info!("Transaction {id} marked {} by {}", update.status, user.sub);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transactions::fixtures::transaction;

    #[test]
    fn tabs_count_every_status_and_mark_active() {
        let transactions = vec![
            transaction("1", "INV/1", "pending", 1),
            transaction("2", "INV/2", "pending", 1),
            transaction("3", "INV/3", "failed", 1),
        ];
        let params: ListParams = serde_html_form::from_str("value=failed&page=3").unwrap();
        let state = QueryState::from_params(&params);

        let tabs = status_tabs(&transactions, &state);

        let counts: Vec<_> = tabs.iter().map(|tab| (tab.value.as_str(), tab.count)).collect();
        assert_eq!(
            counts,
            vec![("pending", 2), ("success", 0), ("cancelled", 0), ("failed", 1)]
        );
        assert!(tabs[3].active);
        assert_eq!(tabs[0].href, "/dashboard/transaksi?value=pending");
    }
}
