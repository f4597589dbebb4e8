use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::upload_document::UploadDocumentResponse;
use crate::domain::entities::Document;

#[derive(Debug, Serialize)]
pub struct DocumentResponseDto {
    pub id: Uuid,
    pub filename: String,
    pub upload_timestamp: String,
}

impl From<Document> for DocumentResponseDto {
    fn from(document: Document) -> Self {
        Self {
            id: document.id(),
            filename: document.filename().to_string(),
            upload_timestamp: document.upload_timestamp().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponseDto {
    pub message: String,
    pub file_id: Uuid,
}

impl From<UploadDocumentResponse> for UploadResponseDto {
    fn from(response: UploadDocumentResponse) -> Self {
        Self {
            message: response.message,
            file_id: response.file_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequestDto {
    pub file_id: Uuid,
}
