use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{BannerId, CatalogName, ImageUrl, null_as_default};
use crate::listing::{FilterField, Filterable};

/// Hero banner rotated on the storefront home page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: BannerId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `create-banner` and `update-banner/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBanner {
    pub name: CatalogName,
    pub image_url: ImageUrl,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BannerField {
    #[default]
    Name,
}

impl FilterField for BannerField {
    const ALL: &'static [Self] = &[BannerField::Name];

    fn as_str(self) -> &'static str {
        "name"
    }

    fn label(self) -> &'static str {
        "Name"
    }
}

impl Filterable for Banner {
    type Field = BannerField;

    fn field_value(&self, field: BannerField) -> Option<Cow<'_, str>> {
        match field {
            BannerField::Name => Some(Cow::Borrowed(self.name.as_str())),
        }
    }
}
