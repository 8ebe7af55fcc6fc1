use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use jobboard_listings::{FilterCriteria, RawFilterForm};

use crate::app::dto;
use crate::app::errors::{self, Surface};
use crate::app::services::AppServices;

pub async fn list_jobs(
    Extension(services): Extension<Arc<AppServices>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> axum::response::Response {
    let criteria = match FilterCriteria::parse(&RawFilterForm::from_pairs(pairs)) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e, Surface::Json),
    };

    match services.store().find_approved_matching(&criteria).await {
        Ok(postings) => (
            StatusCode::OK,
            Json(dto::listing_to_json(&postings, &criteria, Utc::now())),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e, Surface::Json),
    }
}

pub async fn list_locations(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().find_distinct_approved_locations().await {
        Ok(locations) => (StatusCode::OK, Json(dto::locations_to_json(&locations))).into_response(),
        Err(e) => errors::store_error_to_response(e, Surface::Json),
    }
}
