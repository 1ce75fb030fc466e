use pubadmin_server::{Result, config::ServerConfig, run::run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = ServerConfig::load()?;
    run(args).await
}
