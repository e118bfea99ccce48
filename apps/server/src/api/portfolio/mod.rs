mod dto;
mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::main_lib::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/holdings", get(handlers::get_holdings))
        .route("/allocation", get(handlers::get_allocation))
        .route("/performance", get(handlers::get_performance))
        .route("/summary", get(handlers::get_summary))
        .route("/top-performers", get(handlers::get_top_performers))
        .route("/sectors", get(handlers::get_sectors))
        .route("/view", get(handlers::get_view))
        .route("/reload", post(handlers::reload))
}
