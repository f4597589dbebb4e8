use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::ExtractionHandler;

pub fn extraction_routes(extraction_handler: Arc<ExtractionHandler>) -> Router {
    Router::new()
        .route("/extract-info", post(ExtractionHandler::extract_info))
        .with_state(extraction_handler)
}
