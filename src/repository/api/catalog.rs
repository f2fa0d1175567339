use async_trait::async_trait;

use crate::domain::activity::{Activity, NewActivity};
use crate::domain::banner::{Banner, NewBanner};
use crate::domain::category::{Category, NewCategory};
use crate::domain::payment_method::PaymentMethod;
use crate::domain::promo::{NewPromo, Promo};
use crate::domain::types::{ActivityId, ApiToken, BannerId, CategoryId, PromoId};
use crate::repository::api::ApiRepository;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ActivityReader, ActivityWriter, BannerReader, BannerWriter, CategoryReader, CategoryWriter,
    ListKind, ListRefresher, PaymentMethodReader, PromoReader, PromoWriter,
};

#[async_trait]
impl BannerReader for ApiRepository {
    async fn list_banners(&self) -> RepositoryResult<Vec<Banner>> {
        self.caches()
            .banners
            .get_or_fetch(|| self.fetch_list("banners", None))
            .await
    }

    async fn get_banner(&self, id: &BannerId) -> RepositoryResult<Option<Banner>> {
        self.fetch_optional(&format!("banner/{id}"), None).await
    }
}

#[async_trait]
impl BannerWriter for ApiRepository {
    async fn create_banner(&self, token: &ApiToken, banner: &NewBanner) -> RepositoryResult<()> {
        self.post_json("create-banner", Some(token), banner).await?;
        self.refresh(ListKind::Banners);
        Ok(())
    }

    async fn update_banner(
        &self,
        token: &ApiToken,
        id: &BannerId,
        banner: &NewBanner,
    ) -> RepositoryResult<()> {
        self.post_json(&format!("update-banner/{id}"), Some(token), banner)
            .await?;
        self.refresh(ListKind::Banners);
        Ok(())
    }

    async fn delete_banner(&self, token: &ApiToken, id: &BannerId) -> RepositoryResult<()> {
        self.delete(&format!("delete-banner/{id}"), token).await?;
        self.refresh(ListKind::Banners);
        Ok(())
    }
}

#[async_trait]
impl CategoryReader for ApiRepository {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        self.caches()
            .categories
            .get_or_fetch(|| self.fetch_list("categories", None))
            .await
    }

    async fn get_category(&self, id: &CategoryId) -> RepositoryResult<Option<Category>> {
        self.fetch_optional(&format!("category/{id}"), None).await
    }
}

#[async_trait]
impl CategoryWriter for ApiRepository {
    async fn create_category(
        &self,
        token: &ApiToken,
        category: &NewCategory,
    ) -> RepositoryResult<()> {
        self.post_json("create-category", Some(token), category)
            .await?;
        self.refresh(ListKind::Categories);
        Ok(())
    }

    async fn update_category(
        &self,
        token: &ApiToken,
        id: &CategoryId,
        category: &NewCategory,
    ) -> RepositoryResult<()> {
        self.post_json(&format!("update-category/{id}"), Some(token), category)
            .await?;
        self.refresh(ListKind::Categories);
        Ok(())
    }

    async fn delete_category(&self, token: &ApiToken, id: &CategoryId) -> RepositoryResult<()> {
        self.delete(&format!("delete-category/{id}"), token).await?;
        self.refresh(ListKind::Categories);
        // Activities embed their category.
        self.refresh(ListKind::Activities);
        Ok(())
    }
}

#[async_trait]
impl PromoReader for ApiRepository {
    async fn list_promos(&self) -> RepositoryResult<Vec<Promo>> {
        self.caches()
            .promos
            .get_or_fetch(|| self.fetch_list("promos", None))
            .await
    }

    async fn get_promo(&self, id: &PromoId) -> RepositoryResult<Option<Promo>> {
        self.fetch_optional(&format!("promo/{id}"), None).await
    }
}

#[async_trait]
impl PromoWriter for ApiRepository {
    async fn create_promo(&self, token: &ApiToken, promo: &NewPromo) -> RepositoryResult<()> {
        self.post_json("create-promo", Some(token), promo).await?;
        self.refresh(ListKind::Promos);
        Ok(())
    }

    async fn update_promo(
        &self,
        token: &ApiToken,
        id: &PromoId,
        promo: &NewPromo,
    ) -> RepositoryResult<()> {
        self.post_json(&format!("update-promo/{id}"), Some(token), promo)
            .await?;
        self.refresh(ListKind::Promos);
        Ok(())
    }

    async fn delete_promo(&self, token: &ApiToken, id: &PromoId) -> RepositoryResult<()> {
        self.delete(&format!("delete-promo/{id}"), token).await?;
        self.refresh(ListKind::Promos);
        Ok(())
    }
}

#[async_trait]
impl ActivityReader for ApiRepository {
    async fn list_activities(&self) -> RepositoryResult<Vec<Activity>> {
        self.caches()
            .activities
            .get_or_fetch(|| self.fetch_list("activities", None))
            .await
    }

    async fn get_activity(&self, id: &ActivityId) -> RepositoryResult<Option<Activity>> {
        self.fetch_optional(&format!("activity/{id}"), None).await
    }

    async fn list_activities_by_category(
        &self,
        category_id: &CategoryId,
    ) -> RepositoryResult<Vec<Activity>> {
        self.fetch_list(&format!("activities-by-category/{category_id}"), None)
            .await
    }
}

#[async_trait]
impl ActivityWriter for ApiRepository {
    async fn create_activity(
        &self,
        token: &ApiToken,
        activity: &NewActivity,
    ) -> RepositoryResult<()> {
        self.post_json("create-activity", Some(token), activity)
            .await?;
        self.refresh(ListKind::Activities);
        Ok(())
    }

    async fn update_activity(
        &self,
        token: &ApiToken,
        id: &ActivityId,
        activity: &NewActivity,
    ) -> RepositoryResult<()> {
        self.post_json(&format!("update-activity/{id}"), Some(token), activity)
            .await?;
        self.refresh(ListKind::Activities);
        Ok(())
    }

    async fn delete_activity(&self, token: &ApiToken, id: &ActivityId) -> RepositoryResult<()> {
        self.delete(&format!("delete-activity/{id}"), token).await?;
        self.refresh(ListKind::Activities);
        Ok(())
    }
}

#[async_trait]
impl PaymentMethodReader for ApiRepository {
    async fn list_payment_methods(&self) -> RepositoryResult<Vec<PaymentMethod>> {
        self.caches()
            .payment_methods
            .get_or_fetch(|| self.fetch_list("payment-methods", None))
            .await
    }
}
