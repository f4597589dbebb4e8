use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::DocumentHandler;

pub fn document_routes(document_handler: Arc<DocumentHandler>) -> Router {
    Router::new()
        .route("/upload-doc", post(DocumentHandler::upload_document))
        .route("/list-docs", get(DocumentHandler::list_documents))
        .route("/delete-doc", post(DocumentHandler::delete_document))
        .with_state(document_handler)
}
