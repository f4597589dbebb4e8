use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::entities::{ConversationTurn, TurnRole};
use crate::domain::value_objects::ModelName;

#[derive(Debug)]
pub enum GenerationError {
    NetworkError(String),
    ApiError(String),
    InvalidResponse(String),
    Timeout,
    Configuration(String),
    UnsupportedCapability(String),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            GenerationError::ApiError(msg) => write!(f, "Model API error: {}", msg),
            GenerationError::InvalidResponse(msg) => write!(f, "Invalid model response: {}", msg),
            GenerationError::Timeout => write!(f, "Model call timed out"),
            GenerationError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            GenerationError::UnsupportedCapability(msg) => {
                write!(f, "Unsupported capability: {}", msg)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&ConversationTurn> for ChatMessage {
    fn from(turn: &ConversationTurn) -> Self {
        let role = match turn.role {
            TurnRole::User => MessageRole::User,
            TurnRole::Assistant => MessageRole::Assistant,
        };
        ChatMessage::new(role, turn.text.clone())
    }
}

/// Ordered messages for one model call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    pub messages: Vec<ChatMessage>,
}

impl GenerationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::new(MessageRole::System, content));
        self
    }

    pub fn history(mut self, turns: &[ConversationTurn]) -> Self {
        self.messages.extend(turns.iter().map(ChatMessage::from));
        self
    }

    pub fn human(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::new(MessageRole::User, content));
        self
    }
}

/// JSON schema a structured reply must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    fn model_name(&self) -> ModelName;

    fn supports_structured_output(&self) -> bool;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    async fn generate_structured(
        &self,
        request: &GenerationRequest,
        schema: &OutputSchema,
    ) -> Result<serde_json::Value, GenerationError>;
}

pub trait LanguageModelProvider: Send + Sync {
    fn model(&self, name: ModelName) -> Arc<dyn LanguageModel>;
}
