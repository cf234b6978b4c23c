use discover_cache::CacheStore;
use discover_config::Config;
use discover_queue::TaskQueue;
use discover_telemetry::MetricsSink;
use std::sync::Arc;

/// Shared, cloneable handle threaded through every axum handler via
/// [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub cache: CacheStore,
    pub queue: Arc<TaskQueue>,
    pub metrics: Arc<MetricsSink>,
    pub config: Arc<Config>,
}
