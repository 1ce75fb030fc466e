use std::{path::PathBuf, sync::Arc};

use pubadmin_dal::Pool;
use url::Url;

use crate::{
    config::ServerConfig,
    error::{ApiError, ApiResult},
};

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(app_config: AppConfig, pool: Pool) -> Self {
        AppState {
            state: Arc::new(AppStateInner {
                config: app_config,
                pool,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.config
    }

    /// Public URL of a server resource, segments are appended to base URL path
    pub fn build_url(&self, segments: &[&str]) -> ApiResult<Url> {
        extend_base_url(&self.config().base_url, segments)
    }

    pub fn pool(&self) -> &Pool {
        &self.state.pool
    }
}

struct AppStateInner {
    pool: Pool,
    config: AppConfig,
}

pub struct AppConfig {
    pub base_url: Url,
    pub covers_dir: PathBuf,
    pub upload_limit_mb: usize,
}

impl From<&ServerConfig> for AppConfig {
    fn from(config: &ServerConfig) -> Self {
        AppConfig {
            base_url: config.base_url.clone(),
            covers_dir: config.covers_dir(),
            upload_limit_mb: config.upload_limit_mb,
        }
    }
}

fn extend_base_url(base_url: &Url, segments: &[&str]) -> ApiResult<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InternalError(format!("Base URL {base_url} cannot have path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
