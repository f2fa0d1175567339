//! Login, registration and logout against the remote API.

use crate::domain::auth::{Credentials, Registration};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AuthGateway, RepositoryError};
use crate::services::{ServiceError, ServiceResult, failed};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Exchanges the form's credentials for a session.
pub async fn login<R>(repo: &R, form: LoginForm) -> ServiceResult<AuthenticatedUser>
where
    R: AuthGateway + ?Sized,
{
    let credentials = Credentials::try_from(form)?;

    match repo.login(&credentials).await {
        Ok(session) => {
            log::info!("User {} logged in", session.user.id);
            Ok(AuthenticatedUser::from_session(&session))
        }
        Err(
            RepositoryError::Unauthorized(_) | RepositoryError::Api(_) | RepositoryError::NotFound,
        ) => Err(ServiceError::Form(INVALID_CREDENTIALS.to_string())),
        Err(err) => Err(failed("log in")(err)),
    }
}

/// Creates a customer account. The user logs in afterwards.
pub async fn register<R>(repo: &R, form: RegisterForm) -> ServiceResult<()>
where
    R: AuthGateway + ?Sized,
{
    let registration = Registration::try_from(form)?;

    repo.register(&registration)
        .await
        .map_err(failed("register"))?;

    log::info!("Registered {}", registration.email.as_str());
    Ok(())
}

/// Ends the remote session. Failures are logged and ignored: the local
/// identity is dropped either way.
pub async fn logout<R>(repo: &R, user: &AuthenticatedUser)
where
    R: AuthGateway + ?Sized,
{
    if let Err(err) = repo.logout(&user.token).await {
        log::warn!("Remote logout failed for {}: {err}", user.sub);
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::auth::AuthSession;
    use crate::domain::types::ApiToken;
    use crate::domain::user::{User, UserRole};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::customer;

    fn login_form(password: &str) -> LoginForm {
        LoginForm {
            email: "ana@example.com".into(),
            password: password.into(),
        }
    }

    #[actix_web::test]
    async fn login_builds_authenticated_user() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .withf(|credentials| credentials.email.as_str() == "ana@example.com")
            .times(1)
            .returning(|_| {
                Ok(AuthSession {
                    user: User {
                        id: "u-9".try_into().unwrap(),
                        name: "Ana".into(),
                        email: "ana@example.com".into(),
                        role: UserRole::Admin,
                        profile_picture_url: None,
                        phone_number: None,
                    },
                    token: ApiToken::new("remote").unwrap(),
                })
            });

        let user = login(&repo, login_form("secret1")).await.unwrap();

        assert_eq!(user.sub, "u-9");
        assert!(user.is_admin());
        assert_eq!(user.token.as_str(), "remote");
    }

    #[actix_web::test]
    async fn rejected_login_is_a_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .returning(|_| Err(RepositoryError::Api("Wrong password".into())));

        let err = login(&repo, login_form("secret1")).await.unwrap_err();

        assert_eq!(err.user_message(), INVALID_CREDENTIALS);
    }

    #[actix_web::test]
    async fn invalid_form_never_reaches_the_api() {
        let mut repo = MockRepository::new();
        repo.expect_login().times(0);

        let result = login(&repo, login_form("")).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn logout_ignores_remote_failure() {
        let mut repo = MockRepository::new();
        repo.expect_logout()
            .times(1)
            .returning(|_| Err(RepositoryError::ConnectionError("down".into())));

        logout(&repo, &customer()).await;
    }
}
