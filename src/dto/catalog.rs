//! Storefront page data.

use serde::Serialize;

use crate::domain::activity::Activity;
use crate::domain::banner::Banner;
use crate::domain::category::Category;
use crate::domain::promo::Promo;
use crate::listing::ListPage;

#[derive(Debug, Serialize)]
pub struct HomePageData {
    pub banners: Vec<Banner>,
    pub categories: Vec<Category>,
    pub promos: Vec<Promo>,
    /// Best rated activities.
    pub activities: Vec<Activity>,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ActivityCatalogPageData {
    pub list: ListPage<Activity>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActivityDetailPageData {
    pub activity: Activity,
}

#[derive(Debug, Serialize)]
pub struct CategoryPageData {
    pub category: Category,
    pub activities: Vec<Activity>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PromoDetailPageData {
    pub promo: Promo,
}
