pub mod chat_handler;
pub mod document_handler;
pub mod extraction_handler;

pub use chat_handler::ChatHandler;
pub use document_handler::DocumentHandler;
pub use extraction_handler::ExtractionHandler;

use axum::response::Response;

use crate::domain::value_objects::ModelName;
use crate::presentation::http::dto::ApiResponse;

/// Parses an optional model name; absent means the default model.
pub(crate) fn parse_model(model: Option<&str>) -> Result<ModelName, Response> {
    match model {
        None => Ok(ModelName::default()),
        Some(name) => name.parse::<ModelName>().map_err(|e| {
            ApiResponse::error("INVALID_MODEL", e, None)
                .into_response_with(axum::http::StatusCode::BAD_REQUEST)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_model() {
        assert_eq!(parse_model(None).unwrap(), ModelName::Gpt4oMini);
        assert_eq!(parse_model(Some("phi3")).unwrap(), ModelName::Phi3);
        assert_eq!(
            parse_model(Some("gpt-5")).unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
