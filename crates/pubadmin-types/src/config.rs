use std::path::PathBuf;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum UploaderKind {
    /// Cover hosting of pubadmin-server
    Server,
    /// Cloudinary unsigned upload
    Cloudinary,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ConsoleConfig {
    #[arg(
        long,
        env = "PUBADMIN_API_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of publications backend"
    )]
    pub api_url: Url,

    #[arg(
        long,
        value_enum,
        env = "PUBADMIN_UPLOADER",
        default_value_t = UploaderKind::Server,
        help = "Where cover images are uploaded"
    )]
    pub uploader: UploaderKind,

    #[arg(
        long,
        env = "PUBADMIN_CLOUDINARY_CLOUD_NAME",
        help = "Cloudinary cloud name, required for cloudinary uploader"
    )]
    pub cloudinary_cloud_name: Option<String>,

    #[arg(
        long,
        env = "PUBADMIN_CLOUDINARY_UPLOAD_PRESET",
        help = "Cloudinary unsigned upload preset, required for cloudinary uploader"
    )]
    pub cloudinary_upload_preset: Option<String>,
}

pub fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("pubadmin"))
        .unwrap_or_else(|| PathBuf::from("pubadmin"))
        .to_string_lossy()
        .to_string()
}
