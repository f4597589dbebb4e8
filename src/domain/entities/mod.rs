pub mod answer;
pub mod content_chunk;
pub mod conversation;
pub mod document;
pub mod extraction;
pub mod query_context;

pub use answer::{AnswerResult, RetrievedChunk, SourceInfo};
pub use content_chunk::ContentChunk;
pub use conversation::{ChatLog, ConversationTurn, TurnRole, history_from_logs};
pub use document::Document;
pub use extraction::{ExtractedRecord, ExtractionResult};
pub use query_context::QueryContext;
