use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use serde_json::json;

use jobboard_core::DomainError;
use jobboard_infra::StoreError;

use crate::views::ErrorPage;

/// Which kind of client an error response is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Html,
    Json,
}

pub fn store_error_to_response(err: StoreError, surface: Surface) -> axum::response::Response {
    tracing::error!("store query failed: {err}");
    let (status, code) = match &err {
        StoreError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable"),
        StoreError::Decode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
    };
    match surface {
        Surface::Html => html_error(status, "Jobs are unavailable", "Please try again in a moment."),
        Surface::Json => json_error(status, code, err.to_string()),
    }
}

pub fn domain_error_to_response(err: DomainError, surface: Surface) -> axum::response::Response {
    tracing::warn!("rejected filter input: {err}");
    let status = StatusCode::UNPROCESSABLE_ENTITY;
    match surface {
        Surface::Html => html_error(status, "Invalid filter", err.to_string()),
        Surface::Json => json_error(status, "validation_error", err.to_string()),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn html_error(
    status: StatusCode,
    title: impl Into<String>,
    message: impl Into<String>,
) -> axum::response::Response {
    let page = ErrorPage {
        status: status.as_u16(),
        title: title.into(),
        message: message.into(),
    };
    match page.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!("error page failed to render: {e}");
            (status, page.message).into_response()
        }
    }
}

/// Render a page template, falling back to a plain 500 when rendering fails.
pub fn render_page<T: Template>(page: &T) -> axum::response::Response {
    match page.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!("page failed to render: {e}");
            html_error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong", "The page could not be rendered.")
        }
    }
}
