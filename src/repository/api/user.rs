use async_trait::async_trait;
use reqwest::Method;

use crate::domain::auth::{AuthSession, Credentials, LoginResponse, Registration};
use crate::domain::types::{ApiToken, UserId};
use crate::domain::user::{UpdateUserRole, User};
use crate::repository::api::ApiRepository;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AuthGateway, UserReader, UserWriter};

#[async_trait]
impl UserReader for ApiRepository {
    async fn list_users(&self, token: &ApiToken) -> RepositoryResult<Vec<User>> {
        self.fetch_list("all-user", Some(token)).await
    }

    async fn current_user(&self, token: &ApiToken) -> RepositoryResult<User> {
        self.fetch("user", Some(token)).await
    }
}

#[async_trait]
impl UserWriter for ApiRepository {
    async fn update_user_role(
        &self,
        token: &ApiToken,
        id: &UserId,
        update: &UpdateUserRole,
    ) -> RepositoryResult<()> {
        self.post_json(&format!("update-user-role/{id}"), Some(token), update)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl AuthGateway for ApiRepository {
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<AuthSession> {
        let response: LoginResponse = self
            .post_json("login", None, credentials)
            .await?
            .json()
            .await?;

        let user = response
            .data
            .ok_or_else(|| RepositoryError::DecodeError("login: response has no user".into()))?;
        let token = ApiToken::new(response.token.unwrap_or_default())?;

        Ok(AuthSession { user, token })
    }

    async fn register(&self, registration: &Registration) -> RepositoryResult<()> {
        self.post_json("register", None, registration).await?;
        Ok(())
    }

    async fn logout(&self, token: &ApiToken) -> RepositoryResult<()> {
        Self::send(self.request(Method::GET, "logout", Some(token))).await?;
        Ok(())
    }
}
