use std::str::FromStr;
use std::time::Duration;

use crate::application::services::RetrieverConfig;
use crate::application::services::retriever::{DEFAULT_RELEVANCE_THRESHOLD, DEFAULT_TOP_K};
use crate::application::services::sla_extractor::DEFAULT_EXTRACTION_TOP_K;
use crate::infrastructure::external_services::LanguageModelConfig;
use crate::infrastructure::external_services::semantic_chunking::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE,
};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBEDDINGS_SERVICE_URL: &str = "http://localhost:8000/embeddings";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 250 * 1024 * 1024;
pub const DEFAULT_DATABASE_POOL_SIZE: u32 = 10;

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_pool_size: u32,
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub ollama_base_url: String,
    pub embeddings_service_url: String,
    pub relevance_threshold: f32,
    pub retrieval_top_k: usize,
    pub extraction_top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub llm_timeout: Duration,
    pub retrieval_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let config = Self {
            database_url,
            database_pool_size: parse_or(&get, "DATABASE_POOL_SIZE", DEFAULT_DATABASE_POOL_SIZE)?,
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            ollama_base_url: get("OLLAMA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            embeddings_service_url: get("EMBEDDINGS_SERVICE_URL")
                .unwrap_or_else(|| DEFAULT_EMBEDDINGS_SERVICE_URL.to_string()),
            relevance_threshold: parse_or(&get, "RELEVANCE_THRESHOLD", DEFAULT_RELEVANCE_THRESHOLD)?,
            retrieval_top_k: parse_or(&get, "RETRIEVAL_TOP_K", DEFAULT_TOP_K)?,
            extraction_top_k: parse_or(&get, "EXTRACTION_TOP_K", DEFAULT_EXTRACTION_TOP_K)?,
            chunk_size: parse_or(&get, "CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?,
            chunk_overlap: parse_or(&get, "CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP)?,
            llm_timeout: Duration::from_secs(parse_or(&get, "LLM_TIMEOUT_SECS", 120)?),
            retrieval_timeout: Duration::from_secs(parse_or(&get, "RETRIEVAL_TIMEOUT_SECS", 30)?),
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.relevance_threshold) {
            return Err(ConfigError::Invalid {
                key: "RELEVANCE_THRESHOLD",
                value: self.relevance_threshold.to_string(),
            });
        }

        let positive = [
            ("DATABASE_POOL_SIZE", self.database_pool_size as usize),
            ("RETRIEVAL_TOP_K", self.retrieval_top_k),
            ("EXTRACTION_TOP_K", self.extraction_top_k),
            ("CHUNK_SIZE", self.chunk_size),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    value: value.to_string(),
                });
            }
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::Invalid {
                key: "CHUNK_OVERLAP",
                value: self.chunk_overlap.to_string(),
            });
        }
        Ok(())
    }

    pub fn retriever_config(&self) -> RetrieverConfig {
        RetrieverConfig {
            threshold: self.relevance_threshold,
            top_k: self.retrieval_top_k,
            timeout: self.retrieval_timeout,
        }
    }

    pub fn language_model_config(&self) -> LanguageModelConfig {
        LanguageModelConfig {
            openai_api_key: self.openai_api_key.clone(),
            openai_base_url: self.openai_base_url.clone(),
            ollama_base_url: self.ollama_base_url.clone(),
            timeout: self.llm_timeout,
        }
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
