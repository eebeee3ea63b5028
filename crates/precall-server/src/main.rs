mod api;
mod middleware;
mod validate;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use precall_audit::AuditRunner;
use precall_cache::AuditCache;
use precall_places::{PlacesClient, SerpClient};
use precall_scanner::SiteScanner;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = precall_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(?config, "starting pre-call audit server");

    let cache_path = config.cache_path.to_string_lossy().into_owned();
    let cache = AuditCache::connect(&cache_path, config.cache_ttl_hours).await?;

    let places = PlacesClient::new(&config.google_maps_api_key, config.http_timeout_secs)?;
    let scanner = SiteScanner::new(config.http_timeout_secs, &config.scan_user_agent)?;
    let serp = match &config.serpapi_api_key {
        Some(key) => Some(SerpClient::new(key, config.http_timeout_secs)?),
        None => None,
    };
    let runner = AuditRunner::new(places, scanner, serp);

    let app = build_app(AppState {
        runner: Arc::new(runner),
        cache,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
