use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::parse_model;
use crate::application::use_cases::{
    ChatUseCase,
    chat::{ChatError, ChatRequest},
};
use crate::presentation::http::dto::{ApiResponse, ChatRequestDto, ChatResponseDto};

pub struct ChatHandler {
    chat_use_case: Arc<ChatUseCase>,
}

impl ChatHandler {
    pub fn new(chat_use_case: Arc<ChatUseCase>) -> Self {
        Self { chat_use_case }
    }

    pub async fn chat(
        State(handler): State<Arc<ChatHandler>>,
        Json(payload): Json<ChatRequestDto>,
    ) -> Response {
        let model = match parse_model(payload.model.as_deref()) {
            Ok(model) => model,
            Err(response) => return response,
        };

        tracing::info!(
            "Chat request: session={:?}, model={}",
            payload.session_id,
            model
        );

        let request = ChatRequest {
            question: payload.question,
            session_id: payload.session_id,
            model,
        };

        match handler.chat_use_case.execute(request).await {
            Ok(response) => {
                (StatusCode::OK, Json(ChatResponseDto::from(response))).into_response()
            }
            Err(e) => {
                let (status, code) = chat_error_status(&e);
                if status.is_server_error() {
                    tracing::error!("Chat failed: {}", e);
                }
                ApiResponse::error(code, e.to_string(), None).into_response_with(status)
            }
        }
    }
}

fn chat_error_status(error: &ChatError) -> (StatusCode, &'static str) {
    if error.is_timeout() {
        return (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT");
    }
    match error {
        ChatError::ValidationError(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
        ChatError::Retrieval(_) => (StatusCode::INTERNAL_SERVER_ERROR, "RETRIEVAL_FAILED"),
        ChatError::Generation(_) => (StatusCode::INTERNAL_SERVER_ERROR, "GENERATION_FAILED"),
        ChatError::RepositoryError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAILED"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::language_model::GenerationError;
    use crate::application::services::retriever::RetrievalError;

    #[test]
    fn test_chat_error_status() {
        assert_eq!(
            chat_error_status(&ChatError::ValidationError("empty".to_string())).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            chat_error_status(&ChatError::Retrieval(RetrievalError::Timeout)).0,
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            chat_error_status(&ChatError::Generation(GenerationError::Timeout)).0,
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            chat_error_status(&ChatError::Generation(GenerationError::ApiError(
                "500".to_string()
            )))
            .0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
