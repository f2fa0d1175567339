//! Back-office catalog management: banners, categories, promos and
//! activities.
//!
//! Add and edit forms upload any new image first and then send the payload
//! carrying the resulting URL. A failed upload aborts before the mutation.

use crate::domain::activity::{Activity, ActivityField};
use crate::domain::banner::{Banner, BannerField};
use crate::domain::category::{Category, CategoryField};
use crate::domain::promo::{Promo, PromoField};
use crate::domain::types::{ActivityId, ApiToken, BannerId, CategoryId, ImageUrl, PromoId};
use crate::domain::upload::ImageUpload;
use crate::domain::user::UserRole;
use crate::dto::admin::{AdminListPageData, EditPageData};
use crate::forms::catalog::{ActivityInput, CatalogEntryInput, PromoInput};
use crate::forms::{FormError, invalid};
use crate::listing::{ListParams, ListView, QueryState};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::GRID_PAGE_SIZE;
use crate::repository::{
    ActivityReader, ActivityWriter, BannerReader, BannerWriter, CategoryReader, CategoryWriter,
    ImageUploader, ListKind, ListRefresher, PromoReader, PromoWriter,
};
use crate::services::{ServiceError, ServiceResult, ensure_role, failed, universe};

const BANNER_VIEW: ListView<BannerField> = ListView::new(GRID_PAGE_SIZE);
const CATEGORY_VIEW: ListView<CategoryField> = ListView::new(GRID_PAGE_SIZE);
const PROMO_VIEW: ListView<PromoField> = ListView::new(GRID_PAGE_SIZE);
const ACTIVITY_VIEW: ListView<ActivityField> = ListView::new(GRID_PAGE_SIZE);

/// Uploads the new image, or falls back to the URL the form kept.
async fn resolve_image<R>(
    repo: &R,
    token: &ApiToken,
    upload: Option<ImageUpload>,
    existing: Option<String>,
) -> ServiceResult<ImageUrl>
where
    R: ImageUploader + ?Sized,
{
    if let Some(upload) = upload {
        return Ok(repo.upload_image(token, upload).await?);
    }
    let existing = existing.ok_or(FormError::Missing("image"))?;
    Ok(ImageUrl::new(existing).map_err(invalid("image"))?)
}

/// Keeps the listed images and appends the uploaded ones.
async fn resolve_images<R>(
    repo: &R,
    token: &ApiToken,
    uploads: Vec<ImageUpload>,
    existing: &[String],
) -> ServiceResult<Vec<ImageUrl>>
where
    R: ImageUploader + ?Sized,
{
    let mut urls = existing
        .iter()
        .map(|url| ImageUrl::new(url.as_str()).map_err(invalid("image")))
        .collect::<Result<Vec<_>, _>>()?;

    for upload in uploads {
        urls.push(repo.upload_image(token, upload).await?);
    }
    Ok(urls)
}

/// Drops the cached list of `kind` so the next read goes to the API.
pub fn refresh_list<R>(repo: &R, user: &AuthenticatedUser, kind: ListKind) -> ServiceResult<()>
where
    R: ListRefresher + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;
    repo.refresh(kind);
    Ok(())
}

pub async fn list_banners<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ListParams,
) -> ServiceResult<AdminListPageData<Banner>>
where
    R: BannerReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let fetched = universe(repo.list_banners().await, "banners")?;
    let mut state = QueryState::from_params(params);

    Ok(AdminListPageData {
        list: BANNER_VIEW.render(&fetched.data, &mut state, "/dashboard/banner"),
        error: fetched.error,
    })
}

/// Loads the add form (`banner_id == None`) or the edit form of a banner.
pub async fn load_banner_form<R>(
    repo: &R,
    user: &AuthenticatedUser,
    banner_id: Option<&str>,
) -> ServiceResult<EditPageData<Banner>>
where
    R: BannerReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let entry = match banner_id {
        Some(id) => {
            let id = BannerId::new(id).map_err(|_| ServiceError::NotFound)?;
            let banner = repo
                .get_banner(&id)
                .await
                .map_err(failed("load banner"))?
                .ok_or(ServiceError::NotFound)?;
            Some(banner)
        }
        None => None,
    };

    Ok(EditPageData {
        entry,
        categories: Vec::new(),
    })
}

pub async fn create_banner<R>(
    repo: &R,
    user: &AuthenticatedUser,
    input: CatalogEntryInput,
    upload: Option<ImageUpload>,
) -> ServiceResult<()>
where
    R: BannerWriter + ImageUploader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let image_url = resolve_image(repo, &user.token, upload, input.image_url.clone()).await?;
    let banner = input.into_banner(image_url)?;

    repo.create_banner(&user.token, &banner)
        .await
        .map_err(failed("create banner"))
}

pub async fn update_banner<R>(
    repo: &R,
    user: &AuthenticatedUser,
    banner_id: &str,
    input: CatalogEntryInput,
    upload: Option<ImageUpload>,
) -> ServiceResult<()>
where
    R: BannerWriter + ImageUploader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let id = BannerId::new(banner_id).map_err(|_| ServiceError::NotFound)?;
    let image_url = resolve_image(repo, &user.token, upload, input.image_url.clone()).await?;
    let banner = input.into_banner(image_url)?;

    repo.update_banner(&user.token, &id, &banner)
        .await
        .map_err(failed("update banner"))
}

pub async fn delete_banner<R>(
    repo: &R,
    user: &AuthenticatedUser,
    banner_id: &str,
) -> ServiceResult<()>
where
    R: BannerWriter + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let id = BannerId::new(banner_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_banner(&user.token, &id)
        .await
        .map_err(failed("delete banner"))
}

pub async fn list_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ListParams,
) -> ServiceResult<AdminListPageData<Category>>
where
    R: CategoryReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let fetched = universe(repo.list_categories().await, "categories")?;
    let mut state = QueryState::from_params(params);

    Ok(AdminListPageData {
        list: CATEGORY_VIEW.render(&fetched.data, &mut state, "/dashboard/category"),
        error: fetched.error,
    })
}

pub async fn load_category_form<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: Option<&str>,
) -> ServiceResult<EditPageData<Category>>
where
    R: CategoryReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let entry = match category_id {
        Some(id) => {
            let id = CategoryId::new(id).map_err(|_| ServiceError::NotFound)?;
            let category = repo
                .get_category(&id)
                .await
                .map_err(failed("load category"))?
                .ok_or(ServiceError::NotFound)?;
            Some(category)
        }
        None => None,
    };

    Ok(EditPageData {
        entry,
        categories: Vec::new(),
    })
}

pub async fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    input: CatalogEntryInput,
    upload: Option<ImageUpload>,
) -> ServiceResult<()>
where
    R: CategoryWriter + ImageUploader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let image_url = resolve_image(repo, &user.token, upload, input.image_url.clone()).await?;
    let category = input.into_category(image_url)?;

    repo.create_category(&user.token, &category)
        .await
        .map_err(failed("create category"))
}

pub async fn update_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: &str,
    input: CatalogEntryInput,
    upload: Option<ImageUpload>,
) -> ServiceResult<()>
where
    R: CategoryWriter + ImageUploader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let id = CategoryId::new(category_id).map_err(|_| ServiceError::NotFound)?;
    let image_url = resolve_image(repo, &user.token, upload, input.image_url.clone()).await?;
    let category = input.into_category(image_url)?;

    repo.update_category(&user.token, &id, &category)
        .await
        .map_err(failed("update category"))
}

pub async fn delete_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: &str,
) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let id = CategoryId::new(category_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_category(&user.token, &id)
        .await
        .map_err(failed("delete category"))
}

pub async fn list_promos<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ListParams,
) -> ServiceResult<AdminListPageData<Promo>>
where
    R: PromoReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let fetched = universe(repo.list_promos().await, "promos")?;
    let mut state = QueryState::from_params(params);

    Ok(AdminListPageData {
        list: PROMO_VIEW.render(&fetched.data, &mut state, "/dashboard/promo"),
        error: fetched.error,
    })
}

pub async fn load_promo_form<R>(
    repo: &R,
    user: &AuthenticatedUser,
    promo_id: Option<&str>,
) -> ServiceResult<EditPageData<Promo>>
where
    R: PromoReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let entry = match promo_id {
        Some(id) => {
            let id = PromoId::new(id).map_err(|_| ServiceError::NotFound)?;
            let promo = repo
                .get_promo(&id)
                .await
                .map_err(failed("load promo"))?
                .ok_or(ServiceError::NotFound)?;
            Some(promo)
        }
        None => None,
    };

    Ok(EditPageData {
        entry,
        categories: Vec::new(),
    })
}

pub async fn create_promo<R>(
    repo: &R,
    user: &AuthenticatedUser,
    input: PromoInput,
    upload: Option<ImageUpload>,
) -> ServiceResult<()>
where
    R: PromoWriter + ImageUploader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let image_url = resolve_image(repo, &user.token, upload, input.image_url.clone()).await?;
    let promo = input.into_payload(image_url)?;

    repo.create_promo(&user.token, &promo)
        .await
        .map_err(failed("create promo"))
}

pub async fn update_promo<R>(
    repo: &R,
    user: &AuthenticatedUser,
    promo_id: &str,
    input: PromoInput,
    upload: Option<ImageUpload>,
) -> ServiceResult<()>
where
    R: PromoWriter + ImageUploader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let id = PromoId::new(promo_id).map_err(|_| ServiceError::NotFound)?;
    let image_url = resolve_image(repo, &user.token, upload, input.image_url.clone()).await?;
    let promo = input.into_payload(image_url)?;

    repo.update_promo(&user.token, &id, &promo)
        .await
        .map_err(failed("update promo"))
}

pub async fn delete_promo<R>(
    repo: &R,
    user: &AuthenticatedUser,
    promo_id: &str,
) -> ServiceResult<()>
where
    R: PromoWriter + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let id = PromoId::new(promo_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_promo(&user.token, &id)
        .await
        .map_err(failed("delete promo"))
}

pub async fn list_activities<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ListParams,
) -> ServiceResult<AdminListPageData<Activity>>
where
    R: ActivityReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let fetched = universe(repo.list_activities().await, "activities")?;
    let mut state = QueryState::from_params(params);

    Ok(AdminListPageData {
        list: ACTIVITY_VIEW.render(&fetched.data, &mut state, "/dashboard/activity"),
        error: fetched.error,
    })
}

/// Loads the activity form together with the category choices.
pub async fn load_activity_form<R>(
    repo: &R,
    user: &AuthenticatedUser,
    activity_id: Option<&str>,
) -> ServiceResult<EditPageData<Activity>>
where
    R: ActivityReader + CategoryReader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let entry = match activity_id {
        Some(id) => {
            let id = ActivityId::new(id).map_err(|_| ServiceError::NotFound)?;
            let activity = repo
                .get_activity(&id)
                .await
                .map_err(failed("load activity"))?
                .ok_or(ServiceError::NotFound)?;
            Some(activity)
        }
        None => None,
    };

    let categories = universe(repo.list_categories().await, "categories")?;

    Ok(EditPageData {
        entry,
        categories: categories.data,
    })
}

pub async fn create_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    input: ActivityInput,
    uploads: Vec<ImageUpload>,
) -> ServiceResult<()>
where
    R: ActivityWriter + ImageUploader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let image_urls = resolve_images(repo, &user.token, uploads, &input.image_urls).await?;
    let activity = input.into_payload(image_urls)?;

    repo.create_activity(&user.token, &activity)
        .await
        .map_err(failed("create activity"))
}

pub async fn update_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    activity_id: &str,
    input: ActivityInput,
    uploads: Vec<ImageUpload>,
) -> ServiceResult<()>
where
    R: ActivityWriter + ImageUploader + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let id = ActivityId::new(activity_id).map_err(|_| ServiceError::NotFound)?;
    let image_urls = resolve_images(repo, &user.token, uploads, &input.image_urls).await?;
    let activity = input.into_payload(image_urls)?;

    repo.update_activity(&user.token, &id, &activity)
        .await
        .map_err(failed("update activity"))
}

pub async fn delete_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    activity_id: &str,
) -> ServiceResult<()>
where
    R: ActivityWriter + ?Sized,
{
    ensure_role(user, UserRole::Admin)?;

    let id = ActivityId::new(activity_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_activity(&user.token, &id)
        .await
        .map_err(failed("delete activity"))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::upload::{MAX_UPLOAD_BYTES, UploadError};
    use crate::repository::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin, customer};

    fn entry(name: &str, image_url: Option<&str>) -> CatalogEntryInput {
        CatalogEntryInput {
            name: name.into(),
            image_url: image_url.map(str::to_string),
        }
    }

    fn upload() -> ImageUpload {
        ImageUpload::new("beach.png", Some("image/png".into()), vec![1, 2, 3], MAX_UPLOAD_BYTES)
            .unwrap()
    }

    fn banner(id: &str, name: &str) -> Banner {
        serde_json::from_value(serde_json::json!({"id": id, "name": name})).unwrap()
    }

    #[actix_web::test]
    async fn customers_cannot_create_banners() {
        let mut repo = MockRepository::new();
        repo.expect_upload_image().times(0);
        repo.expect_create_banner().times(0);

        let result = create_banner(&repo, &customer(), entry("Sale", None), Some(upload())).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn create_uploads_then_sends_url() {
        let mut repo = MockRepository::new();
        repo.expect_upload_image()
            .times(1)
            .returning(|_, _| Ok(ImageUrl::new("https://cdn.example.com/beach.png").unwrap()));
        repo.expect_create_banner()
            .withf(|_, banner| {
                banner.name.as_str() == "Sale"
                    && banner.image_url.as_str() == "https://cdn.example.com/beach.png"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        create_banner(&repo, &admin(), entry("Sale", None), Some(upload()))
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn failed_upload_skips_mutation() {
        let mut repo = MockRepository::new();
        repo.expect_upload_image()
            .returning(|_, _| Err(UploadError::Failed));
        repo.expect_update_category().times(0);

        let err = update_category(&repo, &admin(), "c-1", entry("Beach", None), Some(upload()))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Image upload failed.");
    }

    #[actix_web::test]
    async fn update_keeps_existing_image() {
        let mut repo = MockRepository::new();
        repo.expect_upload_image().times(0);
        repo.expect_update_category()
            .withf(|_, id, category| {
                id.as_str() == "c-1"
                    && category.image_url.as_str() == "https://cdn.example.com/old.png"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        update_category(
            &repo,
            &admin(),
            "c-1",
            entry("Beach", Some("https://cdn.example.com/old.png")),
            None,
        )
        .await
        .unwrap();
    }

    #[actix_web::test]
    async fn create_without_any_image_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_create_promo().times(0);
        let input = PromoInput {
            title: "Hemat".into(),
            description: "Big sale".into(),
            terms_condition: "Once".into(),
            promo_code: "HEMAT".into(),
            promo_discount_price: "10000".into(),
            minimum_claim_price: String::new(),
            image_url: None,
        };

        let err = create_promo(&repo, &admin(), input, None).await.unwrap_err();

        assert_eq!(err.user_message(), "image is required");
    }

    #[actix_web::test]
    async fn api_rejection_is_reported() {
        let mut repo = MockRepository::new();
        repo.expect_delete_banner()
            .returning(|_, _| Err(RepositoryError::Api("Banner in use".into())));

        let err = delete_banner(&repo, &admin(), "b-1").await.unwrap_err();

        assert_eq!(err.user_message(), "Banner in use");
    }

    #[actix_web::test]
    async fn banner_list_filters_by_name() {
        let mut repo = MockRepository::new();
        repo.expect_list_banners().returning(|| {
            Ok((1..=8)
                .map(|i| banner(&format!("b-{i}"), &format!("Banner {i}")))
                .collect())
        });
        let params: ListParams = serde_html_form::from_str("page=2").unwrap();

        let page = list_banners(&repo, &admin(), &params).await.unwrap();

        assert_eq!(page.list.total_pages(), 2);
        assert_eq!(page.list.items().len(), 2);
    }

    #[actix_web::test]
    async fn activity_form_lists_categories() {
        let mut repo = MockRepository::new();
        repo.expect_get_activity().times(0);
        repo.expect_list_categories().returning(|| {
            Ok(vec![
                serde_json::from_value(serde_json::json!({"id": "c-1", "name": "Beach"})).unwrap(),
            ])
        });

        let page = load_activity_form(&repo, &admin(), None).await.unwrap();

        assert!(page.entry.is_none());
        assert_eq!(page.categories.len(), 1);
    }

    #[test]
    fn refresh_requires_admin() {
        let mut repo = MockRepository::new();
        repo.expect_refresh()
            .withf(|kind| *kind == ListKind::Promos)
            .times(1)
            .return_const(());

        assert!(matches!(
            refresh_list(&repo, &customer(), ListKind::Promos),
            Err(ServiceError::Unauthorized)
        ));
        refresh_list(&repo, &admin(), ListKind::Promos).unwrap();
    }
}
