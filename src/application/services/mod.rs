pub mod answer_generator;
pub mod document_indexer;
pub mod filename_resolver;
pub mod prompts;
pub mod query_rewriter;
pub mod reply_parsing;
pub mod retriever;
pub mod sla_extractor;

pub use answer_generator::AnswerGenerator;
pub use document_indexer::DocumentIndexingService;
pub use filename_resolver::FilenameResolver;
pub use query_rewriter::QueryRewriter;
pub use retriever::{RelevanceRetriever, RetrieverConfig};
pub use sla_extractor::SlaExtractor;
