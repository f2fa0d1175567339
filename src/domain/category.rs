use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CatalogName, CategoryId, ImageUrl, null_as_default};
use crate::listing::{FilterField, Filterable};

/// Activity category shown on the home page and used to group activities.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `create-category` and `update-category/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: CatalogName,
    pub image_url: ImageUrl,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryField {
    #[default]
    Name,
}

impl FilterField for CategoryField {
    const ALL: &'static [Self] = &[CategoryField::Name];

    fn as_str(self) -> &'static str {
        "name"
    }

    fn label(self) -> &'static str {
        "Name"
    }
}

impl Filterable for Category {
    type Field = CategoryField;

    fn field_value(&self, field: CategoryField) -> Option<Cow<'_, str>> {
        match field {
            CategoryField::Name => Some(Cow::Borrowed(self.name.as_str())),
        }
    }
}
