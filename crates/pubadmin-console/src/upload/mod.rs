use std::path::Path;

use bytes::Bytes;
use pubadmin_types::config::{ConsoleConfig, UploaderKind};
use tracing::debug;

pub mod cloudinary;
pub mod server;

pub use cloudinary::CloudinaryUploader;
pub use server::ServerUploader;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Not an image: {0}")]
    NotAnImage(String),
    #[error("Cannot read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Image host rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Uploader not configured: {0}")]
    NotConfigured(String),
}

/// Image selected by user as publication cover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl CoverImage {
    /// Content type is guessed from file name, only images are accepted
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        let content_type = new_mime_guess::from_path(&file_name)
            .first_raw()
            .filter(|mime| mime.starts_with("image/"))
            .ok_or_else(|| UploadError::NotAnImage(file_name.clone()))?;
        let data = data.into();
        if data.is_empty() {
            return Err(UploadError::NotAnImage(format!("{file_name} is empty")));
        }
        Ok(CoverImage {
            file_name,
            content_type: content_type.to_string(),
            data,
        })
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| UploadError::NotAnImage(path.to_string_lossy().to_string()))?;
        let data = tokio::fs::read(path).await?;
        debug!("Loaded cover {file_name}, {} bytes", data.len());
        CoverImage::new(file_name, data)
    }

    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part, UploadError> {
        let part = reqwest::multipart::Part::bytes(self.data.to_vec())
            .file_name(self.file_name)
            .mime_str(&self.content_type)?;
        Ok(part)
    }
}

/// Image hosting service, turns image into durable URL
pub trait ImageUploader {
    async fn upload(&self, image: CoverImage) -> Result<String, UploadError>;
}

/// Uploader selected at runtime from configuration
#[derive(Debug, Clone)]
pub enum ConfiguredUploader {
    Server(ServerUploader),
    Cloudinary(CloudinaryUploader),
}

impl ConfiguredUploader {
    pub fn from_config(
        config: &ConsoleConfig,
        client: reqwest::Client,
    ) -> Result<Self, UploadError> {
        match config.uploader {
            UploaderKind::Server => Ok(ConfiguredUploader::Server(ServerUploader::with_client(
                client,
                &config.api_url,
            ))),
            UploaderKind::Cloudinary => {
                let cloud_name = config.cloudinary_cloud_name.as_deref().ok_or_else(|| {
                    UploadError::NotConfigured("missing Cloudinary cloud name".into())
                })?;
                let preset = config.cloudinary_upload_preset.as_deref().ok_or_else(|| {
                    UploadError::NotConfigured("missing Cloudinary upload preset".into())
                })?;
                Ok(ConfiguredUploader::Cloudinary(CloudinaryUploader::new(
                    client, cloud_name, preset,
                )?))
            }
        }
    }
}

impl ImageUploader for ConfiguredUploader {
    async fn upload(&self, image: CoverImage) -> Result<String, UploadError> {
        match self {
            ConfiguredUploader::Server(uploader) => uploader.upload(image).await,
            ConfiguredUploader::Cloudinary(uploader) => uploader.upload(image).await,
        }
    }
}

pub(crate) async fn rejected(response: reqwest::Response) -> UploadError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|e| format!("unreadable response: {e}"));
    UploadError::Rejected { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_image_content_type() {
        let image = CoverImage::new("cover.PNG", vec![0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(image.content_type, "image/png");

        let image = CoverImage::new("sampul.jpeg", vec![0xff, 0xd8]).unwrap();
        assert_eq!(image.content_type, "image/jpeg");

        assert!(matches!(
            CoverImage::new("report.pdf", vec![1, 2, 3]),
            Err(UploadError::NotAnImage(_))
        ));
        assert!(matches!(
            CoverImage::new("cover.png", Vec::new()),
            Err(UploadError::NotAnImage(_))
        ));
    }

    #[test]
    fn test_cloudinary_requires_settings() {
        let config = ConsoleConfig {
            api_url: "http://localhost:3000".parse().unwrap(),
            uploader: UploaderKind::Cloudinary,
            cloudinary_cloud_name: Some("demo".into()),
            cloudinary_upload_preset: None,
        };
        let res = ConfiguredUploader::from_config(&config, reqwest::Client::new());
        assert!(matches!(res, Err(UploadError::NotConfigured(_))));
    }
}
