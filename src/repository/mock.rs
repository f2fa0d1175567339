//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

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
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ActivityReader, ActivityWriter, AuthGateway, BannerReader, BannerWriter, CartReader,
    CartWriter, CategoryReader, CategoryWriter, ImageUploader, ListKind, ListRefresher,
    PaymentMethodReader, PromoReader, PromoWriter, TransactionReader, TransactionWriter,
    UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl ListRefresher for Repository {
        fn refresh(&self, kind: ListKind);
    }

    #[async_trait]
    impl BannerReader for Repository {
        async fn list_banners(&self) -> RepositoryResult<Vec<Banner>>;
        async fn get_banner(&self, id: &BannerId) -> RepositoryResult<Option<Banner>>;
    }

    #[async_trait]
    impl BannerWriter for Repository {
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
    impl CategoryReader for Repository {
        async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
        async fn get_category(&self, id: &CategoryId) -> RepositoryResult<Option<Category>>;
    }

    #[async_trait]
    impl CategoryWriter for Repository {
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
    impl PromoReader for Repository {
        async fn list_promos(&self) -> RepositoryResult<Vec<Promo>>;
        async fn get_promo(&self, id: &PromoId) -> RepositoryResult<Option<Promo>>;
    }

    #[async_trait]
    impl PromoWriter for Repository {
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
    impl ActivityReader for Repository {
        async fn list_activities(&self) -> RepositoryResult<Vec<Activity>>;
        async fn get_activity(&self, id: &ActivityId) -> RepositoryResult<Option<Activity>>;
        async fn list_activities_by_category(
            &self,
            category_id: &CategoryId,
        ) -> RepositoryResult<Vec<Activity>>;
    }

    #[async_trait]
    impl ActivityWriter for Repository {
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
    impl PaymentMethodReader for Repository {
        async fn list_payment_methods(&self) -> RepositoryResult<Vec<PaymentMethod>>;
    }

    #[async_trait]
    impl CartReader for Repository {
        async fn list_cart(&self, token: &ApiToken) -> RepositoryResult<Vec<CartItem>>;
    }

    #[async_trait]
    impl CartWriter for Repository {
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
    impl TransactionReader for Repository {
        async fn list_my_transactions(&self, token: &ApiToken) -> RepositoryResult<Vec<Transaction>>;
        async fn list_all_transactions(&self, token: &ApiToken) -> RepositoryResult<Vec<Transaction>>;
        async fn get_transaction(
            &self,
            token: &ApiToken,
            id: &TransactionId,
        ) -> RepositoryResult<Option<Transaction>>;
    }

    #[async_trait]
    impl TransactionWriter for Repository {
        async fn create_transaction(
            &self,
            token: &ApiToken,
            transaction: &NewTransaction,
        ) -> RepositoryResult<()>;
        async fn cancel_transaction(&self, token: &ApiToken, id: &TransactionId) -> RepositoryResult<()>;
        async fn update_transaction_status(
            &self,
            token: &ApiToken,
            id: &TransactionId,
            update: &UpdateTransactionStatus,
        ) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl UserReader for Repository {
        async fn list_users(&self, token: &ApiToken) -> RepositoryResult<Vec<User>>;
        async fn current_user(&self, token: &ApiToken) -> RepositoryResult<User>;
    }

    #[async_trait]
    impl UserWriter for Repository {
        async fn update_user_role(
            &self,
            token: &ApiToken,
            id: &UserId,
            update: &UpdateUserRole,
        ) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl AuthGateway for Repository {
        async fn login(&self, credentials: &Credentials) -> RepositoryResult<AuthSession>;
        async fn register(&self, registration: &Registration) -> RepositoryResult<()>;
        async fn logout(&self, token: &ApiToken) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl ImageUploader for Repository {
        async fn upload_image(
            &self,
            token: &ApiToken,
            upload: ImageUpload,
        ) -> Result<ImageUrl, UploadError>;
    }
}
