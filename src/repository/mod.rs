//! Data Source and Mutation traits over the remote travel API.
//!
//! Readers return whole ordered lists; screens filter and paginate them in
//! memory. Writers take the caller's bearer token and report success or the
//! API's error message through [`RepositoryError`].

use async_trait::async_trait;

use crate::domain::activity::{Activity, NewActivity};
use crate::domain::auth::{AuthSession, Credentials, Registration};
use crate::domain::banner::{Banner, NewBanner};
use crate::domain::cart::{CartItem, NewCartItem, UpdateCartQuantity};
use crate::domain::category::{Category, NewCategory};
use crate::domain::payment_method::PaymentMethod;
use crate::domain::promo::{NewPromo, Promo};
use crate::domain::transaction::{NewTransaction, Transaction, UpdateTransactionStatus};
use crate::domain::types::{
    ActivityId, ApiToken, BannerId, CartItemId, CategoryId, ImageUrl, PromoId, TransactionId,
    UserId,
};
use crate::domain::upload::{ImageUpload, UploadError};
use crate::domain::user::{UpdateUserRole, User};

pub mod api;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use api::ApiRepository;
pub use errors::{RepositoryError, RepositoryResult};

/// Cached catalog lists that can be refreshed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Activities,
    Banners,
    Categories,
    Promos,
    PaymentMethods,
}

impl ListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ListKind::Activities => "activities",
            ListKind::Banners => "banners",
            ListKind::Categories => "categories",
            ListKind::Promos => "promos",
            ListKind::PaymentMethods => "payment methods",
        }
    }
}

/// Drops a cached list so the next read re-fetches it.
pub trait ListRefresher: Send + Sync {
    fn refresh(&self, kind: ListKind);
}

#[async_trait]
pub trait BannerReader: Send + Sync {
    async fn list_banners(&self) -> RepositoryResult<Vec<Banner>>;
    async fn get_banner(&self, id: &BannerId) -> RepositoryResult<Option<Banner>>;
}

#[async_trait]
pub trait BannerWriter: Send + Sync {
    async fn create_banner(&self, token: &ApiToken, banner: &NewBanner) -> RepositoryResult<()>;
    async fn update_banner(
        &self,
        token: &ApiToken,
        id: &BannerId,
        banner: &NewBanner,
    ) -> RepositoryResult<()>;
    async fn delete_banner(&self, token: &ApiToken, id: &BannerId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait CategoryReader: Send + Sync {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    async fn get_category(&self, id: &CategoryId) -> RepositoryResult<Option<Category>>;
}

#[async_trait]
pub trait CategoryWriter: Send + Sync {
    async fn create_category(
        &self,
        token: &ApiToken,
        category: &NewCategory,
    ) -> RepositoryResult<()>;
    async fn update_category(
        &self,
        token: &ApiToken,
        id: &CategoryId,
        category: &NewCategory,
    ) -> RepositoryResult<()>;
    async fn delete_category(&self, token: &ApiToken, id: &CategoryId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait PromoReader: Send + Sync {
    async fn list_promos(&self) -> RepositoryResult<Vec<Promo>>;
    async fn get_promo(&self, id: &PromoId) -> RepositoryResult<Option<Promo>>;
}

#[async_trait]
pub trait PromoWriter: Send + Sync {
    async fn create_promo(&self, token: &ApiToken, promo: &NewPromo) -> RepositoryResult<()>;
    async fn update_promo(
        &self,
        token: &ApiToken,
        id: &PromoId,
        promo: &NewPromo,
    ) -> RepositoryResult<()>;
    async fn delete_promo(&self, token: &ApiToken, id: &PromoId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ActivityReader: Send + Sync {
    async fn list_activities(&self) -> RepositoryResult<Vec<Activity>>;
    async fn get_activity(&self, id: &ActivityId) -> RepositoryResult<Option<Activity>>;
    async fn list_activities_by_category(
        &self,
        category_id: &CategoryId,
    ) -> RepositoryResult<Vec<Activity>>;
}

#[async_trait]
pub trait ActivityWriter: Send + Sync {
    async fn create_activity(
        &self,
        token: &ApiToken,
        activity: &NewActivity,
    ) -> RepositoryResult<()>;
    async fn update_activity(
        &self,
        token: &ApiToken,
        id: &ActivityId,
        activity: &NewActivity,
    ) -> RepositoryResult<()>;
    async fn delete_activity(&self, token: &ApiToken, id: &ActivityId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait PaymentMethodReader: Send + Sync {
    async fn list_payment_methods(&self) -> RepositoryResult<Vec<PaymentMethod>>;
}

#[async_trait]
pub trait CartReader: Send + Sync {
    async fn list_cart(&self, token: &ApiToken) -> RepositoryResult<Vec<CartItem>>;
}

#[async_trait]
pub trait CartWriter: Send + Sync {
    async fn add_to_cart(&self, token: &ApiToken, item: &NewCartItem) -> RepositoryResult<()>;
    async fn update_cart_quantity(
        &self,
        token: &ApiToken,
        id: &CartItemId,
        update: &UpdateCartQuantity,
    ) -> RepositoryResult<()>;
    async fn delete_cart_item(&self, token: &ApiToken, id: &CartItemId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait TransactionReader: Send + Sync {
    async fn list_my_transactions(&self, token: &ApiToken) -> RepositoryResult<Vec<Transaction>>;
    async fn list_all_transactions(&self, token: &ApiToken)
    -> RepositoryResult<Vec<Transaction>>;
    async fn get_transaction(
        &self,
        token: &ApiToken,
        id: &TransactionId,
    ) -> RepositoryResult<Option<Transaction>>;
}

#[async_trait]
pub trait TransactionWriter: Send + Sync {
    async fn create_transaction(
        &self,
        token: &ApiToken,
        transaction: &NewTransaction,
    ) -> RepositoryResult<()>;
    async fn cancel_transaction(&self, token: &ApiToken, id: &TransactionId)
    -> RepositoryResult<()>;
    async fn update_transaction_status(
        &self,
        token: &ApiToken,
        id: &TransactionId,
        update: &UpdateTransactionStatus,
    ) -> RepositoryResult<()>;
}

#[async_trait]
pub trait UserReader: Send + Sync {
    async fn list_users(&self, token: &ApiToken) -> RepositoryResult<Vec<User>>;
    async fn current_user(&self, token: &ApiToken) -> RepositoryResult<User>;
}

#[async_trait]
pub trait UserWriter: Send + Sync {
    async fn update_user_role(
        &self,
        token: &ApiToken,
        id: &UserId,
        update: &UpdateUserRole,
    ) -> RepositoryResult<()>;
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<AuthSession>;
    async fn register(&self, registration: &Registration) -> RepositoryResult<()>;
    async fn logout(&self, token: &ApiToken) -> RepositoryResult<()>;
}

/// Sends an image to the remote host and returns its public URL.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload_image(
        &self,
        token: &ApiToken,
        upload: ImageUpload,
    ) -> Result<ImageUrl, UploadError>;
}
