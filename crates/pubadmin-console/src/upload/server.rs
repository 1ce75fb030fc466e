use reqwest::multipart::Form;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{CoverImage, ImageUploader, UploadError, rejected};
use crate::backend::rest::join_base;

/// Cover hosting provided by pubadmin-server
#[derive(Debug, Clone)]
pub struct ServerUploader {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct UploadedCover {
    url: String,
}

impl ServerUploader {
    pub fn new(base_url: &Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &Url) -> Self {
        ServerUploader {
            client,
            endpoint: join_base(base_url, "covers"),
        }
    }
}

impl ImageUploader for ServerUploader {
    async fn upload(&self, image: CoverImage) -> Result<String, UploadError> {
        debug!("Uploading cover {} to {}", image.file_name, self.endpoint);
        let form = Form::new().part("file", image.into_part()?);
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(rejected(response).await);
        }
        let cover: UploadedCover = response.json().await?;
        Ok(cover.url)
    }
}
