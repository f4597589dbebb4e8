use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub error: ApiError,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl ApiResponse {
    pub fn error(code: &str, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            error: ApiError {
                code: code.to_string(),
                message,
                details,
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponseDto {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessageDto {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let value = serde_json::to_value(ApiResponse::error(
            "NOT_FOUND",
            "missing".to_string(),
            None,
        ))
        .unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "NOT_FOUND");
        assert_eq!(value["error"]["message"], "missing");
        assert!(value["error"]["details"].is_null());
        assert!(value["timestamp"].is_string());
    }
}
