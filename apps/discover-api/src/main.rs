mod handlers;
mod lookup;
mod routes;
mod state;
mod validation;

use discover_archive::ArchivePool;
use discover_cache::CacheStore;
use discover_config::Config;
use discover_queue::TaskQueue;
use discover_runner::{JobRunner, RunnerConfig};
use discover_telemetry::{init_tracing, MetricsSink};
use state::AppState;
use std::sync::Arc;
use tracing::info;

const MAX_POOL_SIZE: usize = 50;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("discover-api");

    let config = Config::load()?;
    info!(threads = config.threads, "configuration loaded");

    let archive = ArchivePool::new(MAX_POOL_SIZE, config.cdx_auth_token.as_deref());
    let cache = CacheStore::connect(&config.redis.url()).await?;

    let runner_config = RunnerConfig {
        threads: config.threads,
        expire_after: config.simhash_expire_after(),
        snapshots_per_year: config.snapshots_per_year(),
        fingerprint_width: config.fingerprint_width(),
        ..RunnerConfig::default()
    };
    let runner = JobRunner::new(archive, cache.clone(), runner_config);

    let metrics = Arc::new(MetricsSink::connect("wayback_discover_diff", &config.statsd.host, config.statsd.port));
    let queue = Arc::new(TaskQueue::new(runner, metrics.clone()));

    let state = AppState { cache, queue, metrics, config: Arc::new(config) };
    let app = routes::build_router(state);

    let port: u16 = std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "discover-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
