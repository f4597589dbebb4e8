pub mod ollama;
pub mod openai;
pub mod provider;

pub use ollama::OllamaChatModel;
pub use openai::OpenAiChatModel;
pub use provider::{HostedModelProvider, LanguageModelConfig};

use crate::application::ports::language_model::GenerationError;

pub(crate) fn map_request_error(error: reqwest::Error) -> GenerationError {
    if error.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::NetworkError(format!("Request failed: {}", error.without_url()))
    }
}

pub(crate) fn map_http_error(status: reqwest::StatusCode, body: &str) -> GenerationError {
    match status.as_u16() {
        401 | 403 => GenerationError::Configuration(format!(
            "Authentication rejected ({}): {}",
            status, body
        )),
        408 | 504 => GenerationError::Timeout,
        _ => GenerationError::ApiError(format!("HTTP {}: {}", status, body)),
    }
}

/// Sends `body` and returns the raw reply text, mapping transport and status failures.
pub(crate) async fn post_json(
    request: reqwest::RequestBuilder,
    body: &serde_json::Value,
) -> Result<String, GenerationError> {
    let response = request
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(map_request_error)?;

    let status = response.status();
    let response_body = response.text().await.map_err(map_request_error)?;

    if !status.is_success() {
        return Err(map_http_error(status, &response_body));
    }
    Ok(response_body)
}
