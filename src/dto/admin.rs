//! Back-office page data.

use serde::Serialize;

use crate::domain::category::Category;
use crate::listing::ListPage;

/// Counters on the dashboard landing page.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub banners: usize,
    pub promos: usize,
    pub categories: usize,
    pub activities: usize,
    pub transactions: usize,
    pub pending_transactions: usize,
    pub admins: usize,
    pub users: usize,
    pub errors: Vec<String>,
}

/// Any filtered back-office list.
#[derive(Debug, Serialize)]
pub struct AdminListPageData<T> {
    pub list: ListPage<T>,
    pub error: Option<String>,
}

/// Add/edit form of one catalog entry. `entry` is `None` on the add form.
#[derive(Debug, Serialize)]
pub struct EditPageData<T> {
    pub entry: Option<T>,
    /// Category choices for the activity form.
    pub categories: Vec<Category>,
}
