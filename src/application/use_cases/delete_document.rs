use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::VectorIndex;
use crate::domain::repositories::{DocumentRepository, DocumentRepositoryError};

#[derive(Debug)]
pub enum DeleteDocumentError {
    NotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for DeleteDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteDocumentError::NotFound(id) => {
                write!(f, "Document with file_id {} not found.", id)
            }
            DeleteDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteDocumentError {}

impl From<DocumentRepositoryError> for DeleteDocumentError {
    fn from(error: DocumentRepositoryError) -> Self {
        DeleteDocumentError::RepositoryError(error.to_string())
    }
}

/// Result of removing a document from both stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Index removal failed; the metadata record was left in place.
    IndexDeleteFailed,
    /// Chunks are gone but the metadata record could not be removed.
    StoreDeleteFailed,
}

impl DeleteOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }

    pub fn message(&self, file_id: Uuid) -> String {
        match self {
            DeleteOutcome::Deleted => format!(
                "Successfully deleted document with file_id {} from the system.",
                file_id
            ),
            DeleteOutcome::IndexDeleteFailed => format!(
                "Failed to delete document with file_id {} from the vector index.",
                file_id
            ),
            DeleteOutcome::StoreDeleteFailed => format!(
                "Deleted from the vector index but failed to delete document with file_id {} from the database.",
                file_id
            ),
        }
    }
}

pub struct DeleteDocumentUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    vector_index: Arc<dyn VectorIndex>,
}

impl DeleteDocumentUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        vector_index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            document_repository,
            vector_index,
        }
    }

    pub async fn execute(&self, file_id: Uuid) -> Result<DeleteOutcome, DeleteDocumentError> {
        if self.document_repository.find_by_id(file_id).await?.is_none() {
            return Err(DeleteDocumentError::NotFound(file_id));
        }

        match self.vector_index.delete_document(file_id).await {
            Ok(removed) => tracing::info!("Removed {} chunks of document {}", removed, file_id),
            Err(e) => {
                tracing::error!("Vector index delete failed for {}: {}", file_id, e);
                return Ok(DeleteOutcome::IndexDeleteFailed);
            }
        }

        match self.document_repository.delete(file_id).await {
            Ok(true) => Ok(DeleteOutcome::Deleted),
            Ok(false) => {
                tracing::warn!("Document {} vanished before its record was deleted", file_id);
                Ok(DeleteOutcome::StoreDeleteFailed)
            }
            Err(e) => {
                tracing::error!("Record delete failed for {}: {}", file_id, e);
                Ok(DeleteOutcome::StoreDeleteFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ContentChunk, Document};
    use crate::test_support::{InMemoryDocumentRepository, InMemoryVectorIndex};

    async fn seeded(
        repository: InMemoryDocumentRepository,
        index: InMemoryVectorIndex,
    ) -> (Uuid, Arc<InMemoryDocumentRepository>, Arc<InMemoryVectorIndex>) {
        let document = Document::new("aws_sla.pdf".to_string(), None);
        let repository = Arc::new(repository);
        let index = Arc::new(index);
        repository.save(&document).await.unwrap();
        index
            .add_chunks(&[ContentChunk::new(
                document.id(),
                "Uptime".to_string(),
                0,
                Some(1),
                Some("aws_sla.pdf".to_string()),
            )])
            .await
            .unwrap();
        (document.id(), repository, index)
    }

    #[tokio::test]
    async fn test_delete_removes_both() {
        let (id, repository, index) = seeded(
            InMemoryDocumentRepository::default(),
            InMemoryVectorIndex::default(),
        )
        .await;

        let outcome = DeleteDocumentUseCase::new(repository.clone(), index.clone())
            .execute(id)
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(repository.documents().is_empty());
        assert!(index.stored().is_empty());
        assert_eq!(
            outcome.message(id),
            format!("Successfully deleted document with file_id {} from the system.", id)
        );
    }

    #[tokio::test]
    async fn test_index_failure_keeps_metadata() {
        let (id, repository, index) = seeded(
            InMemoryDocumentRepository::default(),
            InMemoryVectorIndex::default().failing_delete(),
        )
        .await;

        let outcome = DeleteDocumentUseCase::new(repository.clone(), index)
            .execute(id)
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::IndexDeleteFailed);
        assert_eq!(repository.documents().len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_after_index_delete() {
        let (id, repository, index) = seeded(
            InMemoryDocumentRepository::default().failing_delete(),
            InMemoryVectorIndex::default(),
        )
        .await;

        let outcome = DeleteDocumentUseCase::new(repository, index.clone())
            .execute(id)
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::StoreDeleteFailed);
        assert!(!outcome.is_complete());
        assert!(index.stored().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let repository = Arc::new(InMemoryDocumentRepository::default());
        let index = Arc::new(InMemoryVectorIndex::default());

        let result = DeleteDocumentUseCase::new(repository, index)
            .execute(Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(DeleteDocumentError::NotFound(_))));
    }
}
