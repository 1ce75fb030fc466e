use reqwest::multipart::Form;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{CoverImage, ImageUploader, UploadError, rejected};

const CLOUDINARY_API: &str = "https://api.cloudinary.com/v1_1/";

/// Unsigned upload to Cloudinary with an upload preset
#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    client: reqwest::Client,
    endpoint: Url,
    upload_preset: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryAnswer {
    secure_url: String,
}

impl CloudinaryUploader {
    pub fn new(
        client: reqwest::Client,
        cloud_name: &str,
        upload_preset: impl Into<String>,
    ) -> Result<Self, UploadError> {
        let endpoint = Url::parse(CLOUDINARY_API)
            .and_then(|base| base.join(&format!("{cloud_name}/image/upload")))
            .map_err(|e| UploadError::NotConfigured(format!("invalid cloud name: {e}")))?;
        Ok(Self::with_endpoint(client, endpoint, upload_preset))
    }

    pub fn with_endpoint(
        client: reqwest::Client,
        endpoint: Url,
        upload_preset: impl Into<String>,
    ) -> Self {
        CloudinaryUploader {
            client,
            endpoint,
            upload_preset: upload_preset.into(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ImageUploader for CloudinaryUploader {
    async fn upload(&self, image: CoverImage) -> Result<String, UploadError> {
        debug!("Uploading cover {} to Cloudinary", image.file_name);
        let form = Form::new()
            .part("file", image.into_part()?)
            .text("upload_preset", self.upload_preset.clone());
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(rejected(response).await);
        }
        let answer: CloudinaryAnswer = response.json().await?;
        Ok(answer.secure_url)
    }
}
