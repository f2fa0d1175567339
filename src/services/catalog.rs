//! Public storefront pages.

use crate::domain::activity::{Activity, ActivityField};
use crate::domain::types::{ActivityId, CategoryId, PromoId};
use crate::dto::catalog::{
    ActivityCatalogPageData, ActivityDetailPageData, CategoryPageData, HomePageData,
    PromoDetailPageData,
};
use crate::listing::{ListParams, ListView, QueryState};
use crate::pagination::GRID_PAGE_SIZE;
use crate::repository::{ActivityReader, BannerReader, CategoryReader, PromoReader};
use crate::services::{ServiceError, ServiceResult, failed, universe};

/// Activities shown on the home page.
pub const TOP_ACTIVITIES: usize = 8;

const ACTIVITY_VIEW: ListView<ActivityField> = ListView::new(GRID_PAGE_SIZE);

/// Loads the home page sections. A failing section renders empty.
pub async fn load_home<R>(repo: &R) -> ServiceResult<HomePageData>
where
    R: BannerReader + CategoryReader + PromoReader + ActivityReader + ?Sized,
{
    let banners = universe(repo.list_banners().await, "banners")?;
    let categories = universe(repo.list_categories().await, "categories")?;
    let promos = universe(repo.list_promos().await, "promos")?;
    let activities = universe(repo.list_activities().await, "activities")?;

    let errors = [
        banners.error,
        categories.error,
        promos.error,
        activities.error,
    ]
    .into_iter()
    .flatten()
    .collect();

    Ok(HomePageData {
        banners: banners.data,
        categories: categories.data,
        promos: promos.data,
        activities: top_rated(activities.data, TOP_ACTIVITIES),
        errors,
    })
}

/// Best rated first; ties keep the API order.
fn top_rated(mut activities: Vec<Activity>, limit: usize) -> Vec<Activity> {
    activities.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    activities.truncate(limit);
    activities
}

/// Filters and paginates the activity catalog for `/activity`.
pub async fn load_activity_catalog<R>(
    repo: &R,
    params: &ListParams,
) -> ServiceResult<ActivityCatalogPageData>
where
    R: ActivityReader + ?Sized,
{
    let fetched = universe(repo.list_activities().await, "activities")?;
    let mut state = QueryState::from_params(params);

    let list = ACTIVITY_VIEW.render(&fetched.data, &mut state, "/activity");

    Ok(ActivityCatalogPageData {
        list,
        error: fetched.error,
    })
}

pub async fn load_activity<R>(repo: &R, activity_id: &str) -> ServiceResult<ActivityDetailPageData>
where
    R: ActivityReader + ?Sized,
{
    let id = ActivityId::new(activity_id).map_err(|_| ServiceError::NotFound)?;

    let activity = repo
        .get_activity(&id)
        .await
        .map_err(failed("load activity"))?
        .ok_or(ServiceError::NotFound)?;

    Ok(ActivityDetailPageData { activity })
}

/// Loads a category with its activities.
pub async fn load_category<R>(repo: &R, category_id: &str) -> ServiceResult<CategoryPageData>
where
    R: CategoryReader + ActivityReader + ?Sized,
{
    let id = CategoryId::new(category_id).map_err(|_| ServiceError::NotFound)?;

    let category = repo
        .get_category(&id)
        .await
        .map_err(failed("load category"))?
        .ok_or(ServiceError::NotFound)?;

    let activities = universe(
        repo.list_activities_by_category(&id).await,
        "activities of this category",
    )?;

    Ok(CategoryPageData {
        category,
        activities: activities.data,
        error: activities.error,
    })
}

pub async fn load_promo<R>(repo: &R, promo_id: &str) -> ServiceResult<PromoDetailPageData>
where
    R: PromoReader + ?Sized,
{
    let id = PromoId::new(promo_id).map_err(|_| ServiceError::NotFound)?;

    let promo = repo
        .get_promo(&id)
        .await
        .map_err(failed("load promo"))?
        .ok_or(ServiceError::NotFound)?;

    Ok(PromoDetailPageData { promo })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::ActivityId;
    use crate::repository::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn activity(id: &str, city: &str, rating: f64) -> Activity {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Trip {id}"),
            "city": city,
            "rating": rating,
        }))
        .expect("valid activity")
    }

    /// The catalog filters by the requested field and clamps the page.
    #[actix_web::test]
    async fn catalog_applies_query_state() {
        let mut repo = MockRepository::new();
        repo.expect_list_activities().times(1).returning(|| {
            Ok((1..=10)
                .map(|i| activity(&i.to_string(), if i % 2 == 0 { "Bali" } else { "Jakarta" }, 4.0))
                .collect())
        });
        let params: ListParams =
            serde_html_form::from_str("search=BALI&filter=city&page=4").unwrap();

        let page = load_activity_catalog(&repo, &params).await.unwrap();

        assert!(page.error.is_none());
        assert_eq!(page.list.total_matches, 5);
        assert_eq!(page.list.page(), 1);
        assert_eq!(page.list.items().len(), 5);
    }

    /// A failed fetch renders an empty catalog with a message.
    #[actix_web::test]
    async fn catalog_survives_fetch_failure() {
        let mut repo = MockRepository::new();
        repo.expect_list_activities()
            .returning(|| Err(RepositoryError::ConnectionError("timeout".into())));

        let page = load_activity_catalog(&repo, &ListParams::default())
            .await
            .unwrap();

        assert_eq!(page.error.as_deref(), Some("Failed to load activities."));
        assert_eq!(page.list.total_pages(), 0);
        assert!(!page.list.show_controls);
    }

    #[actix_web::test]
    async fn home_keeps_top_rated_activities() {
        let mut repo = MockRepository::new();
        repo.expect_list_banners().returning(|| Ok(vec![]));
        repo.expect_list_categories().returning(|| Ok(vec![]));
        repo.expect_list_promos()
            .returning(|| Err(RepositoryError::Unexpected("boom".into())));
        repo.expect_list_activities().returning(|| {
            Ok((0..10)
                .map(|i| activity(&format!("a{i}"), "Bali", f64::from(i) / 2.0))
                .collect())
        });

        let home = load_home(&repo).await.unwrap();

        assert_eq!(home.activities.len(), TOP_ACTIVITIES);
        assert_eq!(home.activities[0].id, ActivityId::new("a9").unwrap());
        assert_eq!(home.errors, vec!["Failed to load promos.".to_string()]);
    }

    #[actix_web::test]
    async fn missing_activity_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_activity().returning(|_| Ok(None));

        assert!(matches!(
            load_activity(&repo, "nope").await,
            Err(ServiceError::NotFound)
        ));
    }
}
