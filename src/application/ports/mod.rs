pub mod document_extractor;
pub mod embedding_provider;
pub mod language_model;
pub mod text_splitter;
pub mod vector_index;

pub use document_extractor::DocumentExtractor;
pub use embedding_provider::EmbeddingProvider;
pub use language_model::{LanguageModel, LanguageModelProvider};
pub use text_splitter::TextSplitter;
pub use vector_index::VectorIndex;
