use std::sync::Arc;

use crate::domain::entities::Document;
use crate::domain::repositories::{DocumentRepository, DocumentRepositoryError};

#[derive(Debug)]
pub enum ListDocumentsError {
    RepositoryError(String),
}

impl std::fmt::Display for ListDocumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListDocumentsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListDocumentsError {}

impl From<DocumentRepositoryError> for ListDocumentsError {
    fn from(error: DocumentRepositoryError) -> Self {
        ListDocumentsError::RepositoryError(error.to_string())
    }
}

pub struct ListDocumentsUseCase {
    document_repository: Arc<dyn DocumentRepository>,
}

impl ListDocumentsUseCase {
    pub fn new(document_repository: Arc<dyn DocumentRepository>) -> Self {
        Self {
            document_repository,
        }
    }

    pub async fn execute(&self) -> Result<Vec<Document>, ListDocumentsError> {
        Ok(self.document_repository.find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryDocumentRepository;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_newest_first() {
        let now = Utc::now();
        let older = Document::restore(Uuid::new_v4(), "old.pdf".to_string(), None, now - Duration::hours(2));
        let newer = Document::restore(Uuid::new_v4(), "new.html".to_string(), None, now);
        let repository = Arc::new(InMemoryDocumentRepository::with_documents(vec![
            older.clone(),
            newer.clone(),
        ]));

        let documents = ListDocumentsUseCase::new(repository).execute().await.unwrap();

        assert_eq!(documents, vec![newer, older]);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let repository = Arc::new(InMemoryDocumentRepository::default());

        let documents = ListDocumentsUseCase::new(repository).execute().await.unwrap();
        assert!(documents.is_empty());
    }
}
