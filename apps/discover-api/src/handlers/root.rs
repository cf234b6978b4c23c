use axum::response::IntoResponse;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn root() -> impl IntoResponse {
    format!("wayback-discover-diff service version: {VERSION}")
}
