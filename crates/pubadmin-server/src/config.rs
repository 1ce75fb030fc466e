use std::path::PathBuf;

use crate::error::Result;
pub use clap::Parser;
use pubadmin_types::config::default_data_dir;
use url::Url;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Development backend for publications admin console")]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "PUBADMIN_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "PUBADMIN_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "PUBADMIN_BASE_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of server as visible to clients, used for links to uploaded covers"
    )]
    pub base_url: Url,

    #[arg(
        long,
        env = "PUBADMIN_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db, default is sqlite://[data-dir]/pubadmin.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "PUBADMIN_DATA_DIR",
        help = "Data directory (database, covers), default is system default like ~/.local/share/pubadmin",
        default_value_t = default_data_dir()
    )]
    data_dir: String,

    #[arg(
        long,
        env = "PUBADMIN_COVERS_DIR",
        help = "Directory for uploaded cover images, default data_dir/covers"
    )]
    covers_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "PUBADMIN_UPLOAD_LIMIT_MB",
        default_value = "10",
        help = "Maximum cover upload size in MB"
    )]
    pub upload_limit_mb: usize,

    #[arg(long, env = "PUBADMIN_NO_CORS", help = "Disable CORS")]
    pub no_cors: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn covers_dir(&self) -> PathBuf {
        self.covers_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join("covers"))
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}/pubadmin.db", self.data_dir))
    }
}
