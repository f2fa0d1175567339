//! Transaction history of the signed-in user.

use crate::domain::transaction::{Transaction, TransactionField, TransactionStatus};
use crate::domain::types::TransactionId;
use crate::dto::transactions::{
    MyTransactionsPageData, TransactionDetailPageData, TransactionSummary,
};
use crate::listing::{ListParams, ListView, QueryState};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::TABLE_PAGE_SIZE;
use crate::repository::{TransactionReader, TransactionWriter};
use crate::services::{ServiceError, ServiceResult, failed, universe};

/// Search text matches the invoice id or the payment method name.
pub(crate) const TRANSACTION_VIEW: ListView<TransactionField> =
    ListView::widened(TABLE_PAGE_SIZE, TransactionField::SEARCHED);

/// Totals over every transaction of the user, independent of the filters.
pub fn summarize(transactions: &[Transaction]) -> TransactionSummary {
    TransactionSummary {
        count: transactions.len(),
        total_amount: transactions.iter().map(|t| t.total_amount).sum(),
        completed: transactions
            .iter()
            .filter(|t| t.status == TransactionStatus::Success)
            .count(),
    }
}

pub(crate) fn parse_transaction_id(id: &str) -> ServiceResult<TransactionId> {
    TransactionId::new(id).map_err(|_| ServiceError::NotFound)
}

pub async fn load_my_transactions<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ListParams,
) -> ServiceResult<MyTransactionsPageData>
where
    R: TransactionReader + ?Sized,
{
    let fetched = universe(
        repo.list_my_transactions(&user.token).await,
        "transactions",
    )?;
    let mut state = QueryState::from_params(params);

    let list = TRANSACTION_VIEW.render(&fetched.data, &mut state, "/user/transaksi");

    Ok(MyTransactionsPageData {
        summary: summarize(&fetched.data),
        list,
        error: fetched.error,
    })
}

pub async fn load_my_transaction<R>(
    repo: &R,
    user: &AuthenticatedUser,
    transaction_id: &str,
) -> ServiceResult<TransactionDetailPageData>
where
    R: TransactionReader + ?Sized,
{
    let id = parse_transaction_id(transaction_id)?;

    let transaction = repo
        .get_transaction(&user.token, &id)
        .await
        .map_err(failed("load transaction"))?
        .ok_or(ServiceError::NotFound)?;

    Ok(TransactionDetailPageData {
        can_cancel: transaction.status.is_open(),
        transaction,
    })
}

/// Cancels a pending transaction of the user.
pub async fn cancel_transaction<R>(
    repo: &R,
    user: &AuthenticatedUser,
    transaction_id: &str,
) -> ServiceResult<()>
where
    R: TransactionReader + TransactionWriter + ?Sized,
{
    let id = parse_transaction_id(transaction_id)?;

    let transaction = repo
        .get_transaction(&user.token, &id)
        .await
        .map_err(failed("load transaction"))?
        .ok_or(ServiceError::NotFound)?;

    if !transaction.status.is_open() {
        return Err(ServiceError::Form(format!(
            "A {} transaction can no longer be cancelled.",
            transaction.status
        )));
    }

    repo.cancel_transaction(&user.token, &id)
        .await
        .map_err(failed("cancel transaction"))?;

    log::info!("User {} cancelled transaction {id}", user.sub);
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::fixtures::transaction;
    use super::*;

    #[test]
    fn summary_counts_all_and_completed() {
        let transactions = vec![
            transaction("1", "INV/1", "success", 100),
            transaction("2", "INV/2", "pending", 50),
            transaction("3", "INV/3", "Success", 25),
            transaction("4", "INV/4", "cancelled", 10),
        ];

        assert_eq!(
            summarize(&transactions),
            TransactionSummary {
                count: 4,
                total_amount: 185,
                completed: 2,
            }
        );
        assert_eq!(summarize(&[]), TransactionSummary::default());
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod service_tests {
    use super::fixtures::transaction;
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::customer;

    #[actix_web::test]
    async fn history_searches_invoice_and_payment_method() {
        let mut repo = MockRepository::new();
        repo.expect_list_my_transactions().returning(|_| {
            Ok(vec![
                transaction("1", "INV/001", "success", 100),
                transaction("2", "INV/002", "pending", 50),
            ])
        });
        let params: ListParams = serde_html_form::from_str("search=002").unwrap();

        let page = load_my_transactions(&repo, &customer(), &params).await.unwrap();

        assert_eq!(page.list.total_matches, 1);
        assert_eq!(page.summary.count, 2);

        let params: ListParams = serde_html_form::from_str("search=bca").unwrap();
        let page = load_my_transactions(&repo, &customer(), &params).await.unwrap();
        assert_eq!(page.list.total_matches, 2);
    }

    #[actix_web::test]
    async fn settled_transaction_cannot_be_cancelled() {
        let mut repo = MockRepository::new();
        repo.expect_get_transaction()
            .returning(|_, _| Ok(Some(transaction("1", "INV/1", "success", 100))));
        repo.expect_cancel_transaction().times(0);

        let result = cancel_transaction(&repo, &customer(), "1").await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn pending_transaction_is_cancelled() {
        let mut repo = MockRepository::new();
        repo.expect_get_transaction()
            .returning(|_, _| Ok(Some(transaction("1", "INV/1", "pending", 100))));
        repo.expect_cancel_transaction()
            .withf(|_, id| id.as_str() == "1")
            .times(1)
            .returning(|_, _| Ok(()));

        cancel_transaction(&repo, &customer(), "1").await.unwrap();
    }
}
