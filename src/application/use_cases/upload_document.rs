use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::DocumentIndexingService;
use crate::domain::entities::Document;
use crate::domain::repositories::{DocumentRepository, DocumentRepositoryError};
use crate::domain::value_objects::DocumentKind;

#[derive(Debug)]
pub enum UploadDocumentError {
    UnsupportedFileType(String),
    ValidationError(String),
    DuplicateFile(String),
    IndexingFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for UploadDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadDocumentError::UnsupportedFileType(_) => write!(
                f,
                "Unsupported file type. Allowed types are: {}",
                DocumentKind::allowed_extensions()
            ),
            UploadDocumentError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UploadDocumentError::DuplicateFile(name) => {
                write!(f, "A file with the name {} already exists.", name)
            }
            UploadDocumentError::IndexingFailed(name) => write!(f, "Failed to index {}.", name),
            UploadDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UploadDocumentError {}

impl From<DocumentRepositoryError> for UploadDocumentError {
    fn from(error: DocumentRepositoryError) -> Self {
        UploadDocumentError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct UploadDocumentRequest {
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadDocumentResponse {
    pub file_id: Uuid,
    pub message: String,
}

pub struct UploadDocumentUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    indexer: Arc<DocumentIndexingService>,
}

impl UploadDocumentUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        indexer: Arc<DocumentIndexingService>,
    ) -> Self {
        Self {
            document_repository,
            indexer,
        }
    }

    pub async fn execute(
        &self,
        request: UploadDocumentRequest,
    ) -> Result<UploadDocumentResponse, UploadDocumentError> {
        let filename = request.filename.trim().to_string();

        if filename.is_empty() {
            return Err(UploadDocumentError::ValidationError(
                "File name cannot be empty".to_string(),
            ));
        }

        if DocumentKind::from_filename(&filename).is_none() {
            return Err(UploadDocumentError::UnsupportedFileType(filename));
        }

        if request.data.is_empty() {
            return Err(UploadDocumentError::ValidationError(
                "File data cannot be empty".to_string(),
            ));
        }

        if self
            .document_repository
            .find_by_filename(&filename)
            .await?
            .is_some()
        {
            return Err(UploadDocumentError::DuplicateFile(filename));
        }

        let document = Document::new(filename, Some(request.data.len() as i64));
        match self.document_repository.save(&document).await {
            Ok(()) => {}
            Err(DocumentRepositoryError::DuplicateError(_)) => {
                return Err(UploadDocumentError::DuplicateFile(
                    document.filename().to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        if let Err(e) = self.indexer.index(&document, &request.data).await {
            tracing::error!("Indexing {} failed: {}", document.filename(), e);

            if let Err(rollback) = self.document_repository.delete(document.id()).await {
                tracing::error!(
                    "Could not remove record {} after failed indexing: {}",
                    document.id(),
                    rollback
                );
            }

            return Err(UploadDocumentError::IndexingFailed(
                document.filename().to_string(),
            ));
        }

        Ok(UploadDocumentResponse {
            file_id: document.id(),
            message: format!(
                "File {} has been successfully uploaded and indexed.",
                document.filename()
            ),
        })
    }
}
