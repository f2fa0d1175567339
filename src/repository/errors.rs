use thiserror::Error;

use crate::domain::types::TypeConstraintError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The remote API rejected the request; carries its `message`.
    #[error("{0}")]
    Api(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Maps a non-success HTTP status and the API's error message.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("request failed with status {status}"));
        match status {
            404 => RepositoryError::NotFound,
            401 | 403 => RepositoryError::Unauthorized(message),
            400..=499 => RepositoryError::Api(message),
            _ => RepositoryError::Unexpected(message),
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return RepositoryError::from_status(status.as_u16(), None);
        }
        if err.is_timeout() || err.is_connect() {
            RepositoryError::ConnectionError(err.to_string())
        } else if err.is_decode() {
            RepositoryError::DecodeError(err.to_string())
        } else {
            RepositoryError::Unexpected(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::DecodeError(err.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_prefers_api_message() {
        assert!(matches!(
            RepositoryError::from_status(404, None),
            RepositoryError::NotFound
        ));
        assert!(matches!(
            RepositoryError::from_status(401, Some("Token expired".into())),
            RepositoryError::Unauthorized(message) if message == "Token expired"
        ));
        assert_eq!(
            RepositoryError::from_status(422, Some("Name is required".into())).to_string(),
            "Name is required"
        );
        assert_eq!(
            RepositoryError::from_status(502, Some("  ".into())).to_string(),
            "Unexpected error: request failed with status 502"
        );
    }
}
