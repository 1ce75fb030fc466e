use pubadmin_console::{
    PublicationStore, backend::RestBackend, upload::ConfiguredUploader,
};
use pubadmin_types::config::ConsoleConfig;
use tracing::debug;

pub mod add;
pub mod delete;
pub mod edit;
pub mod list;

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self) -> anyhow::Result<()>;
}

/// Store loaded from configured backend
pub(crate) async fn open_store(config: &ConsoleConfig) -> anyhow::Result<PublicationStore<RestBackend>> {
    let backend = RestBackend::with_client(reqwest::Client::new(), &config.api_url);
    let store = PublicationStore::new(backend);
    let count = store.load().await?;
    debug!("Loaded {count} publications from {}", config.api_url);
    Ok(store)
}

pub(crate) fn uploader(config: &ConsoleConfig) -> anyhow::Result<ConfiguredUploader> {
    Ok(ConfiguredUploader::from_config(config, reqwest::Client::new())?)
}
