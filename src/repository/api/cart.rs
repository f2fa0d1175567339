use async_trait::async_trait;

use crate::domain::cart::{CartItem, NewCartItem, UpdateCartQuantity};
use crate::domain::types::{ApiToken, CartItemId};
use crate::repository::api::ApiRepository;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CartReader, CartWriter};

#[async_trait]
impl CartReader for ApiRepository {
    async fn list_cart(&self, token: &ApiToken) -> RepositoryResult<Vec<CartItem>> {
        self.fetch_list("carts", Some(token)).await
    }
}

#[async_trait]
impl CartWriter for ApiRepository {
    async fn add_to_cart(&self, token: &ApiToken, item: &NewCartItem) -> RepositoryResult<()> {
        self.post_json("add-cart", Some(token), item).await?;
        Ok(())
    }

    async fn update_cart_quantity(
        &self,
        token: &ApiToken,
        id: &CartItemId,
        update: &UpdateCartQuantity,
    ) -> RepositoryResult<()> {
        self.post_json(&format!("update-cart/{id}"), Some(token), update)
            .await?;
        Ok(())
    }

    async fn delete_cart_item(&self, token: &ApiToken, id: &CartItemId) -> RepositoryResult<()> {
        self.delete(&format!("delete-cart/{id}"), token).await
    }
}
