pub mod postgres_chat_log_repository;
pub mod postgres_document_repository;

pub use postgres_chat_log_repository::PostgresChatLogRepository;
pub use postgres_document_repository::PostgresDocumentRepository;
