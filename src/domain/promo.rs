use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CatalogName, ImageUrl, PromoCode, PromoId, RichText, null_as_default,
};
use crate::listing::{FilterField, Filterable};

/// Discount campaign with a redeemable code.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Promo {
    pub id: PromoId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "terms_condition")]
    pub terms_condition: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "promo_code")]
    pub promo_code: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "promo_discount_price")]
    pub promo_discount_price: i64,
    #[serde(default, deserialize_with = "null_as_default", rename = "minimum_claim_price")]
    pub minimum_claim_price: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `create-promo` and `update-promo/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPromo {
    pub title: CatalogName,
    pub description: RichText,
    pub image_url: ImageUrl,
    #[serde(rename = "terms_condition")]
    pub terms_condition: RichText,
    #[serde(rename = "promo_code")]
    pub promo_code: PromoCode,
    #[serde(rename = "promo_discount_price")]
    pub promo_discount_price: u64,
    #[serde(rename = "minimum_claim_price")]
    pub minimum_claim_price: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PromoField {
    #[default]
    Title,
    PromoCode,
}

impl FilterField for PromoField {
    const ALL: &'static [Self] = &[PromoField::Title, PromoField::PromoCode];

    fn as_str(self) -> &'static str {
        match self {
            PromoField::Title => "title",
            PromoField::PromoCode => "promo_code",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PromoField::Title => "Title",
            PromoField::PromoCode => "Promo code",
        }
    }
}

impl Filterable for Promo {
    type Field = PromoField;

    fn field_value(&self, field: PromoField) -> Option<Cow<'_, str>> {
        let value = match field {
            PromoField::Title => self.title.as_str(),
            PromoField::PromoCode => self.promo_code.as_str(),
        };
        Some(Cow::Borrowed(value))
    }
}
