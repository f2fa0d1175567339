//! Signed-in user carried in the identity cookie as an HS256 token.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::auth::AuthSession;
use crate::domain::types::ApiToken;
use crate::domain::user::UserRole;
use crate::models::config::ServerConfig;

/// Lifetime of a session token, matching the remote API's bearer tokens.
const SESSION_LIFETIME_HOURS: i64 = 24;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Remote user id.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Bearer token for calls made on behalf of this user.
    pub token: ApiToken,
    pub exp: usize,
}

/// Template-facing view of the signed-in user. Never carries the token.
#[derive(Clone, Debug, Serialize)]
pub struct CurrentUser<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub name: &'a str,
    pub role: UserRole,
    pub is_admin: bool,
}

impl AuthenticatedUser {
    pub fn from_session(session: &AuthSession) -> Self {
        let exp = (Utc::now() + chrono::Duration::hours(SESSION_LIFETIME_HOURS)).timestamp();
        Self {
            sub: session.user.id.to_string(),
            email: session.user.email.clone(),
            name: session.user.name.clone(),
            role: session.user.role,
            token: session.token.clone(),
            exp: usize::try_from(exp).unwrap_or_default(),
        }
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    pub fn view(&self) -> CurrentUser<'_> {
        CurrentUser {
            id: &self.sub,
            email: &self.email,
            name: &self.name,
            role: self.role,
            is_admin: self.is_admin(),
        }
    }

    /// Encodes the user into the string stored as the identity id.
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let identity = req
        .get_identity()
        .map_err(|_| ErrorUnauthorized("Not signed in"))?;
    let token = identity
        .id()
        .map_err(|_| ErrorUnauthorized("Not signed in"))?;

    let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
        log::error!("ServerConfig is not registered as app data");
        return Err(ErrorUnauthorized("Not signed in"));
    };

    AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|err| {
        log::warn!("Rejected identity token: {err}");
        ErrorUnauthorized("Session expired")
    })
}
