use axum::Router;
use axum::extract::DefaultBodyLimit;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::http::{
    handlers::{ChatHandler, DocumentHandler, ExtractionHandler},
    routes::{chat_routes, document_routes, extraction_routes, health_routes},
};

pub struct HttpServer {
    chat_handler: Arc<ChatHandler>,
    document_handler: Arc<DocumentHandler>,
    extraction_handler: Arc<ExtractionHandler>,
    port: u16,
    max_upload_bytes: usize,
}

impl HttpServer {
    pub fn new(
        chat_handler: Arc<ChatHandler>,
        document_handler: Arc<DocumentHandler>,
        extraction_handler: Arc<ExtractionHandler>,
        port: u16,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            chat_handler,
            document_handler,
            extraction_handler,
            port,
            max_upload_bytes,
        }
    }

    fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(health_routes())
            .merge(chat_routes(self.chat_handler.clone()))
            .merge(document_routes(self.document_handler.clone()))
            .merge(extraction_routes(self.extraction_handler.clone()))
            .layer(cors)
            .layer(DefaultBodyLimit::max(self.max_upload_bytes))
            .layer(RequestBodyLimitLayer::new(self.max_upload_bytes))
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            )
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
