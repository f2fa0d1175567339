use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::domain::types::{ApiToken, ImageUrl};
use crate::domain::upload::{ImageUpload, UploadError};
use crate::repository::ImageUploader;
use crate::repository::api::ApiRepository;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
}

#[async_trait]
impl ImageUploader for ApiRepository {
    async fn upload_image(
        &self,
        token: &ApiToken,
        upload: ImageUpload,
    ) -> Result<ImageUrl, UploadError> {
        let file_name = upload.file_name.clone();
        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part.mime_str(content_type).map_err(|err| {
                log::error!("Rejected content type {content_type} for {file_name}: {err}");
                UploadError::Failed
            })?;
        }
        let form = Form::new().part("image", part);

        let response = Self::send(
            self.request(Method::POST, "upload-image", Some(token))
                .multipart(form),
        )
        .await
        .map_err(|err| {
            log::error!("Failed to upload {file_name}: {err}");
            UploadError::Failed
        })?;

        let body: UploadResponse = response.json().await.map_err(|err| {
            log::error!("Failed to decode upload response for {file_name}: {err}");
            UploadError::Failed
        })?;

        body.url
            .and_then(|url| ImageUrl::new(url).ok())
            .ok_or_else(|| {
                log::error!("Upload of {file_name} returned no usable url");
                UploadError::Failed
            })
    }
}
