use crate::config::ServerConfig;
use crate::error::Result;
use crate::state::{AppConfig, AppState};
use axum::http::StatusCode;
use axum::{Router, response::IntoResponse, routing::get};
use futures::FutureExt;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub async fn run(args: ServerConfig) -> Result<()> {
    let state = build_state(&args).await?;
    run_with_state(args, state).await
}

pub async fn run_with_state(args: ServerConfig, state: AppState) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    run_graceful_with_state(args, state, shutdown).await
}

pub async fn run_graceful_with_state<S>(
    args: ServerConfig,
    state: AppState,
    shutdown_signal: S,
) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let mut app = main_router(state);

    if !args.no_cors {
        // console may be served from other origin
        app = app.layer(tower_http::cors::CorsLayer::very_permissive());
    }

    let ip: std::net::IpAddr = args.listen_address.parse()?;
    let addr = std::net::SocketAddr::from((ip, args.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    debug!("Server stopped");
    Ok(())
}

pub fn main_router(state: AppState) -> Router<()> {
    let upload_limit_mb = state.config().upload_limit_mb;
    Router::new()
        .nest(
            "/api/publication",
            crate::rest_api::publication::router(),
        )
        .nest("/covers", crate::covers::router(upload_limit_mb))
        .with_state(state)
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let app_config: AppConfig = config.into();

    if !app_config.covers_dir.is_dir() {
        tokio::fs::create_dir_all(&app_config.covers_dir).await?;
        info!("Created directory for covers {:?}", app_config.covers_dir);
    }
    let data_dir = config.data_dir();
    if !data_dir.is_dir() {
        tokio::fs::create_dir_all(&data_dir).await?;
    }

    let pool = pubadmin_dal::new_pool(&config.database_url()).await?;
    Ok(AppState::new(app_config, pool))
}
