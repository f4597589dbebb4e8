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
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
    refusal: Option<String>,
}

/// Chat model served by an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiChatModel {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: ModelName,
}

impl OpenAiChatModel {
    pub fn new(client: Client, base_url: String, api_key: Option<String>, model: ModelName) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    fn request_body(&self, request: &GenerationRequest, schema: Option<&OutputSchema>) -> Value {
        let mut body = json!({
            "model": self.model.as_str(),
            "messages": request.messages,
            "stream": false,
        });

        if let Some(schema) = schema {
            body["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "schema": schema.schema,
                    "strict": true,
                }
            });
        }
        body
    }

    fn parse_reply(body: &str) -> Result<String, GenerationError> {
        let response: CompletionResponse = serde_json::from_str(body)
            .map_err(|e| GenerationError::InvalidResponse(format!("Invalid JSON: {}", e)))?;

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| GenerationError::InvalidResponse("No choices returned".to_string()))?;

        if let Some(refusal) = message.refusal {
            return Err(GenerationError::ApiError(format!("Model refused: {}", refusal)));
        }

        message
            .content
            .ok_or_else(|| GenerationError::InvalidResponse("Reply has no content".to_string()))
    }

    async fn complete(
        &self,
        request: &GenerationRequest,
        schema: Option<&OutputSchema>,
    ) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GenerationError::Configuration("OPENAI_API_KEY is not set".to_string())
        })?;

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("Sending {} completion request to {}", self.model, url);

        let body = self.request_body(request, schema);
        let reply = post_json(self.client.post(&url).bearer_auth(api_key), &body).await?;
        Self::parse_reply(&reply)
    }
}

#[async_trait]
impl LanguageModel for OpenAiChatModel {
    fn model_name(&self) -> ModelName {
        self.model
    }

    fn supports_structured_output(&self) -> bool {
        true
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.complete(request, None).await
    }

    async fn generate_structured(
        &self,
        request: &GenerationRequest,
        schema: &OutputSchema,
    ) -> Result<Value, GenerationError> {
        let reply = self.complete(request, Some(schema)).await?;
        serde_json::from_str(&reply).map_err(|e| {
            GenerationError::InvalidResponse(format!("Structured reply is not JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(api_key: Option<&str>) -> OpenAiChatModel {
        OpenAiChatModel::new(
            Client::new(),
            "https://api.openai.com/v1/".to_string(),
            api_key.map(str::to_string),
            ModelName::Gpt4oMini,
        )
    }

    #[test]
    fn test_request_body_plain() {
        let request = GenerationRequest::new().system("be brief").human("uptime?");
        let body = model(Some("key")).request_body(&request, None);

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "uptime?");
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_request_body_structured() {
        let schema = OutputSchema {
            name: "ExtractInformation".to_string(),
            schema: json!({"type": "object"}),
        };
        let body = model(Some("key")).request_body(&GenerationRequest::new(), Some(&schema));

        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "ExtractInformation");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn test_parse_reply() {
        let reply = r#"{"choices": [{"message": {"role": "assistant", "content": "99.9%"}}]}"#;
        assert_eq!(OpenAiChatModel::parse_reply(reply).unwrap(), "99.9%");

        assert!(matches!(
            OpenAiChatModel::parse_reply(r#"{"choices": []}"#),
            Err(GenerationError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let result = model(None)
            .generate(&GenerationRequest::new().human("hi"))
            .await;

        assert!(matches!(result, Err(GenerationError::Configuration(_))));
    }
}
