//! Form definitions backing the storefront and dashboard routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod transactions;
pub mod users;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid image url")]
    InvalidUrl,

    #[error("password must be at least 6 characters")]
    InvalidPassword,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("{0} is required")]
    Missing(&'static str),

    #[error("invalid {0}")]
    Invalid(&'static str),
}

/// Attaches a field name to a value-object error.
pub(crate) fn invalid(field: &'static str) -> impl Fn(TypeConstraintError) -> FormError {
    move |err| match err {
        TypeConstraintError::EmptyString | TypeConstraintError::EmptyId => {
            FormError::Missing(field)
        }
        TypeConstraintError::InvalidUrl => FormError::InvalidUrl,
        _ => FormError::Invalid(field),
    }
}
