use axum::{
    Router,
    routing::{get, post},
};

pub mod api;
pub mod jobs;
pub mod system;

/// Router for the job board page, its filter form and the JSON API.
pub fn router() -> Router {
    Router::new()
        .route("/", get(jobs::index))
        .route("/filter", post(jobs::submit_filter))
        .route("/api/jobs", get(api::list_jobs))
        .route("/api/locations", get(api::list_locations))
}
