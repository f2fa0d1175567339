use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{
    ActivityId, CatalogName, CategoryId, ImageUrl, Location, RichText, null_as_default,
};
use crate::listing::{FilterField, Filterable};

/// Bookable travel activity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: i64,
    #[serde(default, deserialize_with = "null_as_default", rename = "price_discount")]
    pub price_discount: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default", rename = "total_reviews")]
    pub total_reviews: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub facilities: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub province: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "location_maps")]
    pub location_maps: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Activity {
    /// Price actually charged: the discounted price when one is set.
    pub fn effective_price(&self) -> i64 {
        if self.has_discount() {
            self.price_discount
        } else {
            self.price
        }
    }

    pub fn has_discount(&self) -> bool {
        self.price_discount > 0 && self.price_discount < self.price
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|category| category.name.as_str())
    }
}

/// Body of `create-activity` and `update-activity/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub category_id: CategoryId,
    pub title: CatalogName,
    pub description: RichText,
    pub image_urls: Vec<ImageUrl>,
    pub price: u64,
    #[serde(rename = "price_discount")]
    pub price_discount: u64,
    pub rating: f64,
    #[serde(rename = "total_reviews")]
    pub total_reviews: u64,
    pub facilities: RichText,
    pub address: Location,
    pub province: Location,
    pub city: Location,
    #[serde(rename = "location_maps")]
    pub location_maps: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActivityField {
    #[default]
    Title,
    City,
    Category,
}

impl FilterField for ActivityField {
    const ALL: &'static [Self] = &[
        ActivityField::Title,
        ActivityField::City,
        ActivityField::Category,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ActivityField::Title => "title",
            ActivityField::City => "city",
            ActivityField::Category => "category",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ActivityField::Title => "Title",
            ActivityField::City => "City",
            ActivityField::Category => "Category",
        }
    }
}

impl Filterable for Activity {
    type Field = ActivityField;

    fn field_value(&self, field: ActivityField) -> Option<Cow<'_, str>> {
        match field {
            ActivityField::Title => Some(Cow::Borrowed(self.title.as_str())),
            ActivityField::City => Some(Cow::Borrowed(self.city.as_str())),
            ActivityField::Category => self.category_name().map(Cow::Borrowed),
        }
    }
}
