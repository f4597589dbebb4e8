use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use super::post_json;
use crate::application::ports::language_model::{
    GenerationError, GenerationRequest, LanguageModel, OutputSchema,
};
use crate::domain::value_objects::ModelName;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

/// Chat model served by a local Ollama runtime.
pub struct OllamaChatModel {
    client: Client,
    base_url: String,
    model: ModelName,
}

impl OllamaChatModel {
    pub fn new(client: Client, base_url: String, model: ModelName) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        json!({
            "model": self.model.as_str(),
            "messages": request.messages,
            "stream": false,
        })
    }

    fn parse_reply(body: &str) -> Result<String, GenerationError> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| GenerationError::InvalidResponse(format!("Invalid JSON: {}", e)))?;
        Ok(response.message.content)
    }
}

#[async_trait]
impl LanguageModel for OllamaChatModel {
    fn model_name(&self) -> ModelName {
        self.model
    }

    fn supports_structured_output(&self) -> bool {
        false
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let url = format!("{}/api/chat", self.base_url);
        tracing::debug!("Sending {} chat request to {}", self.model, url);

        let reply = post_json(self.client.post(&url), &self.request_body(request)).await?;
        Self::parse_reply(&reply)
    }

    async fn generate_structured(
        &self,
        _request: &GenerationRequest,
        _schema: &OutputSchema,
    ) -> Result<Value, GenerationError> {
        Err(GenerationError::UnsupportedCapability(format!(
            "{} does not support structured output",
            self.model
        )))
    }
}
