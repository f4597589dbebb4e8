use serde::{Deserialize, Serialize};

use crate::application::use_cases::chat::ChatResponse;
use crate::domain::entities::SourceInfo;

#[derive(Debug, Deserialize)]
pub struct ChatRequestDto {
    pub question: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseDto {
    pub answer: String,
    pub session_id: String,
    pub model: String,
    pub sources: Vec<SourceInfo>,
}

impl From<ChatResponse> for ChatResponseDto {
    fn from(response: ChatResponse) -> Self {
        Self {
            answer: response.answer,
            session_id: response.session_id,
            model: response.model.to_string(),
            sources: response.sources,
        }
    }
}
