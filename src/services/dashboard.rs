//! Back-office landing page.

use crate::domain::transaction::TransactionStatus;
use crate::domain::user::UserRole;
use crate::dto::admin::DashboardMetrics;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{
    ActivityReader, BannerReader, CategoryReader, PromoReader, TransactionReader, UserReader,
};
use crate::services::{ServiceResult, ensure_role, universe};

/// Counts catalog entries, transactions and accounts. A failing source
/// counts as zero and adds a message.
pub async fn load_metrics<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DashboardMetrics>
where
    R: BannerReader
        + CategoryReader
        + PromoReader
        + ActivityReader
        + TransactionReader
        + UserReader
        + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let banners = universe(repo.list_banners().await, "banners")?;
    let promos = universe(repo.list_promos().await, "promos")?;
    let categories = universe(repo.list_categories().await, "categories")?;
    let activities = universe(repo.list_activities().await, "activities")?;
    let transactions = universe(repo.list_all_transactions(&user.token).await, "transactions")?;
    let users = universe(repo.list_users(&user.token).await, "users")?;

    let admins = users
        .data
        .iter()
        .filter(|account| account.role == UserRole::Admin)
        .count();

    let errors = [
        banners.error,
        promos.error,
        categories.error,
        activities.error,
        transactions.error,
        users.error,
    ]
    .into_iter()
    .flatten()
    .collect();

    Ok(DashboardMetrics {
        banners: banners.data.len(),
        promos: promos.data.len(),
        categories: categories.data.len(),
        activities: activities.data.len(),
        pending_transactions: transactions
            .data
            .iter()
            .filter(|t| t.status == TransactionStatus::Pending)
            .count(),
        transactions: transactions.data.len(),
        admins,
        users: users.data.len() - admins,
        errors,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::user::User;
    use crate::repository::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;
    use crate::services::test_support::{admin, customer};
    use crate::services::transactions::fixtures::transaction;

    fn account(id: &str, role: UserRole) -> User {
        User {
            id: id.try_into().unwrap(),
            name: format!("User {id}"),
            email: format!("{id}@example.com"),
            role,
            profile_picture_url: None,
            phone_number: None,
        }
    }

    #[actix_web::test]
    async fn metrics_count_each_source() {
        let mut repo = MockRepository::new();
        repo.expect_list_banners().returning(|| Ok(vec![]));
        repo.expect_list_promos()
            .returning(|| Err(RepositoryError::ConnectionError("down".into())));
        repo.expect_list_categories().returning(|| Ok(vec![]));
        repo.expect_list_activities().returning(|| Ok(vec![]));
        repo.expect_list_all_transactions().returning(|_| {
            Ok(vec![
                transaction("1", "INV/1", "pending", 1),
                transaction("2", "INV/2", "success", 1),
                transaction("3", "INV/3", "PENDING", 1),
            ])
        });
        repo.expect_list_users().returning(|_| {
            Ok(vec![
                account("a", UserRole::Admin),
                account("b", UserRole::User),
                account("c", UserRole::User),
            ])
        });

        let metrics = load_metrics(&repo, &admin()).await.unwrap();

        assert_eq!(metrics.transactions, 3);
        assert_eq!(metrics.pending_transactions, 2);
        assert_eq!(metrics.admins, 1);
        assert_eq!(metrics.users, 2);
        assert_eq!(metrics.promos, 0);
        assert_eq!(metrics.errors, vec!["Failed to load promos.".to_string()]);
    }

    #[actix_web::test]
    async fn metrics_require_admin() {
        let repo = MockRepository::new();

        assert!(matches!(
            load_metrics(&repo, &customer()).await,
            Err(ServiceError::Unauthorized)
        ));
    }
}
