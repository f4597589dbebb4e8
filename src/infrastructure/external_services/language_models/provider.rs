use reqwest::{Client, Error as ReqwestError};
use std::sync::Arc;
use std::time::Duration;

use super::{OllamaChatModel, OpenAiChatModel};
use crate::application::ports::{LanguageModel, LanguageModelProvider};
use crate::domain::value_objects::{ModelBackend, ModelName};

#[derive(Debug, Clone)]
pub struct LanguageModelConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub ollama_base_url: String,
    pub timeout: Duration,
}

/// Builds a model client for each request from one shared HTTP client.
pub struct HostedModelProvider {
    client: Client,
    config: LanguageModelConfig,
}

impl HostedModelProvider {
    pub fn new(config: LanguageModelConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

impl LanguageModelProvider for HostedModelProvider {
    fn model(&self, name: ModelName) -> Arc<dyn LanguageModel> {
        match name.backend() {
            ModelBackend::OpenAi => Arc::new(OpenAiChatModel::new(
                self.client.clone(),
                self.config.openai_base_url.clone(),
                self.config.openai_api_key.clone(),
                name,
            )),
            ModelBackend::Ollama => Arc::new(OllamaChatModel::new(
                self.client.clone(),
                self.config.ollama_base_url.clone(),
                name,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_backend() {
        let provider = HostedModelProvider::new(LanguageModelConfig {
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        for name in ModelName::ALL {
            let model = provider.model(name);
            assert_eq!(model.model_name(), name);
            assert_eq!(
                model.supports_structured_output(),
                name.backend() == ModelBackend::OpenAi
            );
        }
    }
}
