//! Back-office user management.

use crate::domain::types::UserId;
use crate::domain::user::{UpdateUserRole, User, UserField, UserRole};
use crate::dto::admin::AdminListPageData;
use crate::forms::users::UserRoleForm;
use crate::listing::{ListParams, ListView, QueryState};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::TABLE_PAGE_SIZE;
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role, failed, universe};

/// Search text matches name, email or id; the dropdown narrows by role.
const USER_VIEW: ListView<UserField> = ListView::widened(TABLE_PAGE_SIZE, UserField::SEARCHED);

pub async fn load_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ListParams,
) -> ServiceResult<AdminListPageData<User>>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let fetched = universe(repo.list_users(&user.token).await, "users")?;
    let mut state = QueryState::from_params(params);

    let list = USER_VIEW.render(&fetched.data, &mut state, "/dashboard/users");

    Ok(AdminListPageData {
        list,
        error: fetched.error,
    })
}

pub async fn update_role<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: &str,
    form: UserRoleForm,
) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let id = UserId::new(user_id).map_err(|_| ServiceError::NotFound)?;
    let update = UpdateUserRole::try_from(form)?;

    repo.update_user_role(&user.token, &id, &update)
        .await
        .map_err(failed("update user role"))?;

    log::info!("User {id} is now {} (changed by {})", update.role, user.sub);
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin, customer};

    fn account(id: &str, name: &str, role: UserRole) -> User {
        User {
            id: id.try_into().unwrap(),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
            profile_picture_url: None,
            phone_number: None,
        }
    }

    #[actix_web::test]
    async fn search_spans_name_email_and_id() {
        let mut repo = MockRepository::new();
        repo.expect_list_users().returning(|_| {
            Ok(vec![
                account("u-1", "Budi", UserRole::User),
                account("u-2", "Sari", UserRole::Admin),
                account("x-budi", "Tono", UserRole::User),
            ])
        });
        let params: ListParams = serde_html_form::from_str("search=budi").unwrap();

        let page = load_users(&repo, &admin(), &params).await.unwrap();
        assert_eq!(page.list.total_matches, 2);

        let params: ListParams = serde_html_form::from_str("value=admin").unwrap();
        let page = load_users(&repo, &admin(), &params).await.unwrap();
        assert_eq!(page.list.total_matches, 1);
        assert_eq!(page.list.items()[0].name, "Sari");
    }

    #[actix_web::test]
    async fn role_update_requires_admin_and_known_role() {
        let mut repo = MockRepository::new();
        repo.expect_update_user_role().times(0);

        let form = UserRoleForm { role: "admin".into() };
        assert!(matches!(
            update_role(&repo, &customer(), "u-1", form).await,
            Err(ServiceError::Unauthorized)
        ));

        let form = UserRoleForm { role: "owner".into() };
        assert!(matches!(
            update_role(&repo, &admin(), "u-1", form).await,
            Err(ServiceError::Form(_))
        ));
    }

    #[actix_web::test]
    async fn role_update_reaches_api() {
        let mut repo = MockRepository::new();
        repo.expect_update_user_role()
            .withf(|_, id, update| id.as_str() == "u-1" && update.role == UserRole::Admin)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let form = UserRoleForm { role: "Admin".into() };
        update_role(&repo, &admin(), "u-1", form).await.unwrap();
    }
}
