pub mod document_extractors;
pub mod inference_client;
pub mod language_models;
pub mod semantic_chunking;

pub use document_extractors::CompositeDocumentExtractor;
pub use inference_client::{EmbeddingsClientConfig, InferenceClient, InferenceEmbeddingProvider};
pub use language_models::{HostedModelProvider, LanguageModelConfig};
pub use semantic_chunking::RTSplitter;
