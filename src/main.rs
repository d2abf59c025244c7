use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use adaptive_learning::adapters::classifier::HttpStyleClassifier;
use adaptive_learning::adapters::redis::RedisClassificationLock;
use adaptive_learning::app::{
    build_router, log_engine_settings, Infrastructure, Services,
};
use adaptive_learning::config::{AppConfig, RedisConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    init_tracing(&config);

    config.validate()?;
    log_engine_settings(&config);

    let classifier = Arc::new(HttpStyleClassifier::new(config.classifier.to_http_config())?);
    let mut infra = Infrastructure::in_memory(classifier);
    if let Some(lock) = connect_redis_lock(&config.redis).await? {
        infra = infra.with_lock(Arc::new(lock));
    }

    let services = Services::build(&config, infra)?;
    let app = build_router(&config, &services);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Starting learning-style server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn connect_redis_lock(
    config: &RedisConfig,
) -> Result<Option<RedisClassificationLock>, Box<dyn Error + Send + Sync>> {
    let Some(url) = config.enabled_url() else {
        info!("Redis not configured; classification lock is in-process");
        return Ok(None);
    };

    let client = redis::Client::open(url)?;
    let conn = tokio::time::timeout(config.timeout(), client.get_multiplexed_tokio_connection())
        .await
        .map_err(|_| "timed out connecting to Redis")??;

    info!("Classification lock backed by Redis");
    Ok(Some(
        RedisClassificationLock::new(conn).with_key_prefix(config.lock_key_prefix.clone()),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
