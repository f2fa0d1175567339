//! Role-checked workflows between the routes and the remote API.
//!
//! Services never touch HTTP types: they take repository traits, the signed-in
//! user and already-deserialised forms, and return page data or a
//! [`ServiceError`].

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::domain::upload::UploadError;
use crate::domain::user::UserRole;
use crate::forms::FormError;
use crate::listing::Fetched;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{RepositoryError, RepositoryResult};

pub mod admin_catalog;
pub mod admin_transactions;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod dashboard;
pub mod transactions;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The signed-in user lacks the required role.
    #[error("unauthorized")]
    Unauthorized,

    /// The remote API rejected the user's token.
    #[error("session expired")]
    Unauthenticated,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Message suitable for a flash notification.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Unauthorized => "You are not allowed to do that.".to_string(),
            ServiceError::Unauthenticated => {
                "Your session has expired, please log in again.".to_string()
            }
            ServiceError::NotFound => "The requested item no longer exists.".to_string(),
            ServiceError::Form(message) => message.clone(),
            ServiceError::TypeConstraint(message) => format!("Invalid input: {message}."),
            ServiceError::Upload(err) => format!("Image {err}."),
            ServiceError::Repository(RepositoryError::Api(message)) => message.clone(),
            ServiceError::Repository(_) => {
                "The travel service is unavailable, try again later.".to_string()
            }
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Unauthorized(_) => ServiceError::Unauthenticated,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

/// Fails with [`ServiceError::Unauthorized`] unless `user` has `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: UserRole) -> ServiceResult<()> {
    if user.has_role(role) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Turns a list fetch into the record universe of a screen.
///
/// A rejected session still aborts the request so the user is sent to the
/// login page; any other failure becomes an empty universe with a message.
pub(crate) fn universe<T>(
    result: RepositoryResult<Vec<T>>,
    what: &str,
) -> ServiceResult<Fetched<T>> {
    match result {
        Err(RepositoryError::Unauthorized(message)) => {
            log::warn!("Session rejected while fetching {what}: {message}");
            Err(ServiceError::Unauthenticated)
        }
        other => Ok(Fetched::from_result(other, what)),
    }
}

/// Logs a failed remote call and converts the error.
pub(crate) fn failed(action: &str) -> impl FnOnce(RepositoryError) -> ServiceError + '_ {
    move |err| {
        log::error!("Failed to {action}: {err}");
        ServiceError::from(err)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::types::ApiToken;
    use crate::domain::user::UserRole;
    use crate::models::auth::AuthenticatedUser;

    pub fn user_with_role(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "u-1".to_string(),
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            role,
            token: ApiToken::new("token").unwrap(),
            exp: 0,
        }
    }

    pub fn admin() -> AuthenticatedUser {
        user_with_role(UserRole::Admin)
    }

    pub fn customer() -> AuthenticatedUser {
        user_with_role(UserRole::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{admin, customer};

    #[test]
    fn ensure_role_rejects_other_roles() {
        assert!(ensure_role(&admin(), UserRole::Admin).is_ok());
        assert!(matches!(
            ensure_role(&customer(), UserRole::Admin),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn repository_errors_map_to_service_errors() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::Unauthorized("expired".into())),
            ServiceError::Unauthenticated
        ));
        let err = ServiceError::from(RepositoryError::Api("Promo code already used".into()));
        assert_eq!(err.user_message(), "Promo code already used");
        assert_eq!(
            ServiceError::from(UploadError::FileTooLarge).user_message(),
            "Image file too large."
        );
    }

    #[test]
    fn universe_keeps_session_errors_fatal() {
        let fetched =
            universe::<u8>(Err(RepositoryError::ConnectionError("down".into())), "banners").unwrap();
        assert!(fetched.data.is_empty());
        assert_eq!(fetched.error.as_deref(), Some("Failed to load banners."));

        assert!(matches!(
            universe::<u8>(Err(RepositoryError::Unauthorized("expired".into())), "cart"),
            Err(ServiceError::Unauthenticated)
        ));
    }
}
