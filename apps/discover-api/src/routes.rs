use crate::handlers::{calculate, job, root, simhash};
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(root::root))
        .route("/simhash", get(simhash::get_simhash))
        .route("/calculate-simhash", get(calculate::calculate_simhash))
        .route("/job", get(job::job_status))
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new();
    }
    let allowed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new().allow_origin(AllowOrigin::list(allowed)).allow_methods([axum::http::Method::GET])
}
