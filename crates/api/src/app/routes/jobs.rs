use std::sync::Arc;

use axum::{
    Form,
    extract::{Extension, Query},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;

use jobboard_listings::{FilterCriteria, RawFilterForm};

use crate::app::errors::{self, Surface};
use crate::app::services::AppServices;
use crate::views::IndexPage;

/// `GET /`: the job list, filtered by whatever criteria the query string carries.
pub async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> axum::response::Response {
    let criteria = match FilterCriteria::parse(&RawFilterForm::from_pairs(pairs)) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e, Surface::Html),
    };

    let (postings, locations) = match services.listing_page(&criteria).await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e, Surface::Html),
    };
    tracing::debug!(count = postings.len(), filtered = !criteria.is_empty(), "rendering job list");

    errors::render_page(&IndexPage::new(&postings, &locations, &criteria, Utc::now()))
}

/// `POST /filter`: validate the sidebar form and redirect to the filtered page.
///
/// Fields arrive as ordered pairs so that a repeated name resolves to its
/// last value instead of failing extraction.
pub async fn submit_filter(Form(pairs): Form<Vec<(String, String)>>) -> axum::response::Response {
    match FilterCriteria::parse(&RawFilterForm::from_pairs(pairs)) {
        Ok(criteria) => Redirect::to(&criteria.redirect_target()).into_response(),
        Err(e) => errors::domain_error_to_response(e, Surface::Html),
    }
}
