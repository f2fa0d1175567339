//! Multipart add/edit forms of the back-office catalog screens.
//!
//! Each form splits into a plain input struct and the optional image files,
//! so services can upload first and build the API payload afterwards.

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};

use crate::domain::activity::NewActivity;
use crate::domain::banner::NewBanner;
use crate::domain::category::NewCategory;
use crate::domain::promo::NewPromo;
use crate::domain::types::{
    CatalogName, CategoryId, ImageUrl, Location, PromoCode, RichText,
};
use crate::domain::upload::{ImageUpload, UploadError, check_size};
use crate::forms::{FormError, invalid};

/// Reads a posted file into memory. An empty file input yields `None`.
///
/// The size is checked before the temp file is read.
pub fn read_upload(file: TempFile, max_bytes: u64) -> Result<Option<ImageUpload>, UploadError> {
    if file.size == 0 {
        return Ok(None);
    }
    check_size(file.size as u64, max_bytes)?;

    let bytes = std::fs::read(file.file.path()).map_err(|err| {
        log::error!("Failed to read uploaded file: {err}");
        UploadError::Failed
    })?;
    let file_name = file
        .file_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "image".to_string());
    let content_type = file.content_type.map(|mime| mime.to_string());

    ImageUpload::new(file_name, content_type, bytes, max_bytes).map(Some)
}

fn text(value: Option<Text<String>>) -> Option<String> {
    value
        .map(Text::into_inner)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_amount(value: &str, field: &'static str) -> Result<u64, FormError> {
    let digits: String = value.chars().filter(|ch| !matches!(ch, '.' | ',' | ' ')).collect();
    if digits.is_empty() {
        return Err(FormError::Missing(field));
    }
    digits.parse().map_err(|_| FormError::Invalid(field))
}

fn parse_optional_amount(value: &str, field: &'static str) -> Result<u64, FormError> {
    if value.trim().is_empty() {
        Ok(0)
    } else {
        parse_amount(value, field)
    }
}

/// Name plus image, shared by banners and categories.
#[derive(MultipartForm)]
pub struct CatalogEntryForm {
    pub name: Text<String>,
    /// Current image kept when no new file is chosen.
    pub image_url: Option<Text<String>>,
    pub image: Option<TempFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntryInput {
    pub name: String,
    pub image_url: Option<String>,
}

impl CatalogEntryForm {
    pub fn into_parts(
        self,
        max_bytes: u64,
    ) -> Result<(CatalogEntryInput, Option<ImageUpload>), UploadError> {
        let upload = match self.image {
            Some(file) => read_upload(file, max_bytes)?,
            None => None,
        };
        let input = CatalogEntryInput {
            name: self.name.into_inner(),
            image_url: text(self.image_url),
        };
        Ok((input, upload))
    }
}

impl CatalogEntryInput {
    pub fn into_banner(self, image_url: ImageUrl) -> Result<NewBanner, FormError> {
        Ok(NewBanner {
            name: CatalogName::new(self.name).map_err(invalid("name"))?,
            image_url,
        })
    }

    pub fn into_category(self, image_url: ImageUrl) -> Result<NewCategory, FormError> {
        Ok(NewCategory {
            name: CatalogName::new(self.name).map_err(invalid("name"))?,
            image_url,
        })
    }
}

#[derive(MultipartForm)]
pub struct PromoForm {
    pub title: Text<String>,
    pub description: Text<String>,
    pub terms_condition: Text<String>,
    pub promo_code: Text<String>,
    pub promo_discount_price: Text<String>,
    pub minimum_claim_price: Text<String>,
    pub image_url: Option<Text<String>>,
    pub image: Option<TempFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoInput {
    pub title: String,
    pub description: String,
    pub terms_condition: String,
    pub promo_code: String,
    pub promo_discount_price: String,
    pub minimum_claim_price: String,
    pub image_url: Option<String>,
}

impl PromoForm {
    pub fn into_parts(
        self,
        max_bytes: u64,
    ) -> Result<(PromoInput, Option<ImageUpload>), UploadError> {
        let upload = match self.image {
            Some(file) => read_upload(file, max_bytes)?,
            None => None,
        };
        let input = PromoInput {
            title: self.title.into_inner(),
            description: self.description.into_inner(),
            terms_condition: self.terms_condition.into_inner(),
            promo_code: self.promo_code.into_inner(),
            promo_discount_price: self.promo_discount_price.into_inner(),
            minimum_claim_price: self.minimum_claim_price.into_inner(),
            image_url: text(self.image_url),
        };
        Ok((input, upload))
    }
}

impl PromoInput {
    pub fn into_payload(self, image_url: ImageUrl) -> Result<NewPromo, FormError> {
        let promo_discount_price = parse_amount(&self.promo_discount_price, "discount")?;
        let minimum_claim_price =
            parse_optional_amount(&self.minimum_claim_price, "minimum claim price")?;

        Ok(NewPromo {
            title: CatalogName::new(self.title).map_err(invalid("title"))?,
            description: RichText::new(self.description).map_err(invalid("description"))?,
            image_url,
            terms_condition: RichText::new(self.terms_condition)
                .map_err(invalid("terms and conditions"))?,
            promo_code: PromoCode::new(self.promo_code).map_err(invalid("promo code"))?,
            promo_discount_price,
            minimum_claim_price,
        })
    }
}

#[derive(MultipartForm)]
pub struct ActivityForm {
    pub category_id: Text<String>,
    pub title: Text<String>,
    pub description: Text<String>,
    pub price: Text<String>,
    pub price_discount: Option<Text<String>>,
    pub rating: Option<Text<String>>,
    pub total_reviews: Option<Text<String>>,
    pub facilities: Text<String>,
    pub address: Text<String>,
    pub province: Text<String>,
    pub city: Text<String>,
    pub location_maps: Option<Text<String>>,
    /// Images already attached to the activity that should be kept.
    pub image_urls: Vec<Text<String>>,
    pub images: Vec<TempFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivityInput {
    pub category_id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub price_discount: String,
    pub rating: String,
    pub total_reviews: String,
    pub facilities: String,
    pub address: String,
    pub province: String,
    pub city: String,
    pub location_maps: String,
    pub image_urls: Vec<String>,
}

impl ActivityForm {
    pub fn into_parts(
        self,
        max_bytes: u64,
    ) -> Result<(ActivityInput, Vec<ImageUpload>), UploadError> {
        let mut uploads = Vec::new();
        for file in self.images {
            if let Some(upload) = read_upload(file, max_bytes)? {
                uploads.push(upload);
            }
        }

        let input = ActivityInput {
            category_id: self.category_id.into_inner(),
            title: self.title.into_inner(),
            description: self.description.into_inner(),
            price: self.price.into_inner(),
            price_discount: text(self.price_discount).unwrap_or_default(),
            rating: text(self.rating).unwrap_or_default(),
            total_reviews: text(self.total_reviews).unwrap_or_default(),
            facilities: self.facilities.into_inner(),
            address: self.address.into_inner(),
            province: self.province.into_inner(),
            city: self.city.into_inner(),
            location_maps: text(self.location_maps).unwrap_or_default(),
            image_urls: self
                .image_urls
                .into_iter()
                .filter_map(|url| text(Some(url)))
                .collect(),
        };
        Ok((input, uploads))
    }
}

impl ActivityInput {
    pub fn into_payload(self, image_urls: Vec<ImageUrl>) -> Result<NewActivity, FormError> {
        if image_urls.is_empty() {
            return Err(FormError::Missing("image"));
        }

        let price = parse_amount(&self.price, "price")?;
        let price_discount = parse_optional_amount(&self.price_discount, "discount price")?;
        if price_discount > price {
            return Err(FormError::Invalid("discount price"));
        }

        let rating = match self.rating.trim() {
            "" => 0.0,
            raw => raw
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|rating| (0.0..=5.0).contains(rating))
                .ok_or(FormError::Invalid("rating"))?,
        };

        Ok(NewActivity {
            category_id: CategoryId::new(self.category_id).map_err(invalid("category"))?,
            title: CatalogName::new(self.title).map_err(invalid("title"))?,
            description: RichText::new(self.description).map_err(invalid("description"))?,
            image_urls,
            price,
            price_discount,
            rating,
            total_reviews: parse_optional_amount(&self.total_reviews, "total reviews")?,
            facilities: RichText::new(self.facilities).map_err(invalid("facilities"))?,
            address: Location::new(self.address).map_err(invalid("address"))?,
            province: Location::new(self.province).map_err(invalid("province"))?,
            city: Location::new(self.city).map_err(invalid("city"))?,
            location_maps: self.location_maps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageUrl {
        ImageUrl::new("https://cdn.example.com/a.png").unwrap()
    }

    fn activity_input() -> ActivityInput {
        ActivityInput {
            category_id: "c-1".into(),
            title: "Snorkeling".into(),
            description: "Reef trip".into(),
            price: "500.000".into(),
            price_discount: "450000".into(),
            rating: "4,5".into(),
            total_reviews: String::new(),
            facilities: "Mask".into(),
            address: "Jl. Pantai".into(),
            province: "Bali".into(),
            city: "Denpasar".into(),
            location_maps: String::new(),
            image_urls: vec![],
        }
    }

    #[test]
    fn activity_payload_parses_amounts() {
        let payload = activity_input().into_payload(vec![image()]).unwrap();
        assert_eq!(payload.price, 500_000);
        assert_eq!(payload.price_discount, 450_000);
        assert_eq!(payload.rating, 4.5);
        assert_eq!(payload.total_reviews, 0);
    }

    #[test]
    fn activity_requires_image_and_sane_discount() {
        assert!(matches!(
            activity_input().into_payload(vec![]),
            Err(FormError::Missing("image"))
        ));

        let input = ActivityInput {
            price_discount: "600000".into(),
            ..activity_input()
        };
        assert!(matches!(
            input.into_payload(vec![image()]),
            Err(FormError::Invalid("discount price"))
        ));
    }

    #[test]
    fn banner_requires_name() {
        let input = CatalogEntryInput {
            name: "  ".into(),
            image_url: None,
        };
        assert!(matches!(
            input.into_banner(image()),
            Err(FormError::Missing("name"))
        ));
    }

    #[test]
    fn promo_requires_discount() {
        let input = PromoInput {
            title: "Hemat".into(),
            description: "Big sale".into(),
            terms_condition: "Once per user".into(),
            promo_code: "HEMAT10".into(),
            promo_discount_price: String::new(),
            minimum_claim_price: String::new(),
            image_url: None,
        };
        assert!(matches!(
            input.clone().into_payload(image()),
            Err(FormError::Missing("discount"))
        ));

        let payload = PromoInput {
            promo_discount_price: "10000".into(),
            ..input
        }
        .into_payload(image())
        .unwrap();
        assert_eq!(payload.minimum_claim_price, 0);
        assert_eq!(payload.promo_code.as_str(), "HEMAT10");
    }

    fn temp_file(bytes: &[u8], file_name: Option<&str>) -> TempFile {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        TempFile {
            file,
            content_type: None,
            file_name: file_name.map(str::to_string),
            size: bytes.len(),
        }
    }

    #[test]
    fn empty_file_input_is_no_upload() {
        assert!(read_upload(temp_file(b"", Some("")), 10).unwrap().is_none());
    }

    #[test]
    fn upload_reads_file_and_defaults_name() {
        let upload = read_upload(temp_file(b"png", None), 10).unwrap().unwrap();
        assert_eq!(upload.file_name, "image");
        assert_eq!(upload.bytes, b"png");
    }

    #[test]
    fn oversize_upload_is_rejected() {
        assert_eq!(
            read_upload(temp_file(&[0; 11], Some("big.png")), 10).unwrap_err(),
            UploadError::FileTooLarge
        );
    }
}
