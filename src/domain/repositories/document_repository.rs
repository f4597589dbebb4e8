use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Document;

#[derive(Debug)]
pub enum DocumentRepositoryError {
    DatabaseError(String),
    DuplicateError(String),
}

impl std::fmt::Display for DocumentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            DocumentRepositoryError::DuplicateError(msg) => write!(f, "Duplicate error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentRepositoryError {}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DocumentRepositoryError>;
    async fn find_by_filename(
        &self,
        filename: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError>;
    /// Newest upload first.
    async fn find_all(&self) -> Result<Vec<Document>, DocumentRepositoryError>;
    async fn list_filenames(&self) -> Result<Vec<String>, DocumentRepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DocumentRepositoryError>;
}
