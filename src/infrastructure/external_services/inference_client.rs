use async_trait::async_trait;
use pgvector::Vector;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::embedding_provider::{
    BatchEmbeddingRequest, BatchEmbeddingResponse, EmbeddingProvider, EmbeddingProviderError,
    EmbeddingRequest,
};

pub const DEFAULT_EMBEDDING_MODEL: &str = "default";

#[derive(Serialize)]
pub struct EmbeddingsRequest {
    pub text: TextInput,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingsResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    pub embeddings: Vec<Vector>,
    #[serde(default)]
    pub shape: Vec<usize>,
}

fn default_success() -> bool {
    true
}

impl EmbeddingsResponse {
    /// The leading `shape` entry, when present, is the number of vectors returned.
    fn check_shape(&self) -> Result<(), EmbeddingsError> {
        match self.shape.first() {
            Some(&rows) if rows != self.embeddings.len() => Err(EmbeddingsError::ParseError(
                format!(
                    "shape reports {} embeddings, body has {}",
                    rows,
                    self.embeddings.len()
                ),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingsClientConfig {
    pub service_url: String,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
}

impl EmbeddingsClientConfig {
    pub fn new(service_url: String) -> Self {
        Self {
            service_url,
            max_retries: 3,
            timeout_secs: 30,
            backoff_factor: 1.5,
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis((self.backoff_factor.powi(attempt as i32 - 1) * 1000.0) as u64)
    }
}

#[derive(Debug)]
pub enum EmbeddingsError {
    RequestError(String),
    ParseError(String),
    MaxRetriesExceeded(String),
}

impl std::fmt::Display for EmbeddingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingsError::RequestError(msg) => write!(f, "Request error: {}", msg),
            EmbeddingsError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            EmbeddingsError::MaxRetriesExceeded(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for EmbeddingsError {}

impl From<EmbeddingsError> for EmbeddingProviderError {
    fn from(error: EmbeddingsError) -> Self {
        match error {
            EmbeddingsError::RequestError(msg) => EmbeddingProviderError::NetworkError(msg),
            EmbeddingsError::ParseError(msg) => EmbeddingProviderError::ApiError(msg),
            EmbeddingsError::MaxRetriesExceeded(_) => EmbeddingProviderError::ServiceUnavailable,
        }
    }
}

/// HTTP client for the embeddings service, with retry and exponential backoff.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    config: EmbeddingsClientConfig,
}

impl InferenceClient {
    pub fn new(config: EmbeddingsClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn get_embedding(&self, text: &str) -> Result<EmbeddingsResponse, EmbeddingsError> {
        let request = EmbeddingsRequest {
            text: TextInput::Single(text.to_string()),
        };

        self.send_request(request).await
    }

    pub async fn get_embeddings(
        &self,
        texts: &[String],
    ) -> Result<EmbeddingsResponse, EmbeddingsError> {
        let request = EmbeddingsRequest {
            text: TextInput::Multiple(texts.to_vec()),
        };

        self.send_request(request).await
    }

    async fn send_request(
        &self,
        request: EmbeddingsRequest,
    ) -> Result<EmbeddingsResponse, EmbeddingsError> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.execute_request(&request).await {
                Ok(response) => return Ok(response),
                Err(e) if attempts > self.config.max_retries => {
                    return Err(EmbeddingsError::MaxRetriesExceeded(format!(
                        "Gave up after {} attempts: {}",
                        attempts, e
                    )));
                }
                Err(EmbeddingsError::ParseError(msg)) => {
                    return Err(EmbeddingsError::ParseError(msg));
                }
                Err(e) => {
                    tracing::warn!("Embeddings request attempt {} failed: {}", attempts, e);
                    tokio::time::sleep(self.config.backoff(attempts)).await;
                }
            }
        }
    }

    async fn execute_request(
        &self,
        request: &EmbeddingsRequest,
    ) -> Result<EmbeddingsResponse, EmbeddingsError> {
        let response = self
            .client
            .post(&self.config.service_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| EmbeddingsError::RequestError(format!("Error: {}", e.without_url())))?;

        if !response.status().is_success() {
            return Err(EmbeddingsError::RequestError(format!(
                "Embeddings service returned {}",
                response.status()
            )));
        }

        let response_data = response
            .json::<EmbeddingsResponse>()
            .await
            .map_err(|e| EmbeddingsError::ParseError(e.to_string()))?;

        if !response_data.success {
            return Err(EmbeddingsError::ParseError(
                "Embeddings service reported failure".to_string(),
            ));
        }
        response_data.check_shape()?;

        Ok(response_data)
    }
}

/// Adapter exposing the embeddings service through the `EmbeddingProvider` port.
pub struct InferenceEmbeddingProvider {
    client: InferenceClient,
}

impl InferenceEmbeddingProvider {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmbeddingProvider for InferenceEmbeddingProvider {
    async fn generate_embedding(
        &self,
        request: EmbeddingRequest,
    ) -> Result<Vector, EmbeddingProviderError> {
        if request.text.trim().is_empty() {
            return Err(EmbeddingProviderError::InvalidInput(
                "Text cannot be empty".to_string(),
            ));
        }

        let response = self.client.get_embedding(&request.text).await?;

        response.embeddings.into_iter().next().ok_or_else(|| {
            EmbeddingProviderError::ApiError("No embeddings returned".to_string())
        })
    }

    async fn generate_embeddings(
        &self,
        request: BatchEmbeddingRequest,
    ) -> Result<BatchEmbeddingResponse, EmbeddingProviderError> {
        if request.texts.is_empty() {
            return Ok(BatchEmbeddingResponse {
                embeddings: Vec::new(),
                model_name: self.model_name(),
            });
        }

        let response = self.client.get_embeddings(&request.texts).await?;

        Ok(BatchEmbeddingResponse {
            embeddings: response.embeddings,
            model_name: self.model_name(),
        })
    }

    fn model_name(&self) -> String {
        DEFAULT_EMBEDDING_MODEL.to_string()
    }
}
