//! Credentials exchanged with the remote API's `login` and `register`.

use serde::{Deserialize, Serialize};

use crate::domain::types::{ApiToken, ImageUrl, Password, PhoneNumber, UserEmail, UserName};
use crate::domain::user::{User, UserRole};

/// Body of `login`.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub email: UserEmail,
    pub password: Password,
}

/// Body of `register`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: UserEmail,
    pub name: UserName,
    pub password: Password,
    pub password_repeat: Password,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<ImageUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumber>,
}

/// Successful login: the account plus the bearer token for later calls.
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub user: User,
    pub token: ApiToken,
}

/// Shape of the `login` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub data: Option<User>,
    pub token: Option<String>,
}
