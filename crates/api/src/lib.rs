//! HTTP surface of the job board: page rendering, the filter form endpoint
//! and a small JSON API.

pub mod app;
pub mod middleware;
pub mod views;
