use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::parse_model;
use crate::application::use_cases::{
    ExtractInformationUseCase,
    extract_information::{ExtractInformationError, ExtractInformationRequest},
};
use crate::presentation::http::dto::{ApiResponse, ExtractRequestDto};

pub struct ExtractionHandler {
    extract_use_case: Arc<ExtractInformationUseCase>,
}

impl ExtractionHandler {
    pub fn new(extract_use_case: Arc<ExtractInformationUseCase>) -> Self {
        Self { extract_use_case }
    }

    pub async fn extract_info(
        State(handler): State<Arc<ExtractionHandler>>,
        Json(payload): Json<ExtractRequestDto>,
    ) -> Response {
        let model = match parse_model(payload.model.as_deref()) {
            Ok(model) => model,
            Err(response) => return response,
        };

        let request = ExtractInformationRequest {
            file_name: payload.file_name,
            model,
        };

        match handler.extract_use_case.execute(request).await {
            Ok(result) => (StatusCode::OK, Json(result)).into_response(),
            Err(e) => {
                let (status, code) = extraction_error_status(&e);
                if status.is_server_error() {
                    tracing::error!("Extraction failed: {}", e);
                }
                ApiResponse::error(code, e.to_string(), None).into_response_with(status)
            }
        }
    }
}

fn extraction_error_status(error: &ExtractInformationError) -> (StatusCode, &'static str) {
    if error.is_timeout() {
        return (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT");
    }
    match error {
        ExtractInformationError::ValidationError(_) => {
            (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
        }
        ExtractInformationError::Extraction(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "EXTRACTION_FAILED")
        }
    }
}
