use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::application::use_cases::{
    DeleteDocumentUseCase, ListDocumentsUseCase, UploadDocumentUseCase,
    delete_document::DeleteDocumentError,
    upload_document::{UploadDocumentError, UploadDocumentRequest},
};
use crate::presentation::http::dto::{
    ApiResponse, DeleteRequestDto, DocumentResponseDto, ErrorMessageDto, MessageResponseDto,
    UploadResponseDto,
};

pub struct DocumentHandler {
    upload_use_case: Arc<UploadDocumentUseCase>,
    list_documents_use_case: Arc<ListDocumentsUseCase>,
    delete_document_use_case: Arc<DeleteDocumentUseCase>,
}

impl DocumentHandler {
    pub fn new(
        upload_use_case: Arc<UploadDocumentUseCase>,
        list_documents_use_case: Arc<ListDocumentsUseCase>,
        delete_document_use_case: Arc<DeleteDocumentUseCase>,
    ) -> Self {
        Self {
            upload_use_case,
            list_documents_use_case,
            delete_document_use_case,
        }
    }

    pub async fn upload_document(
        State(handler): State<Arc<DocumentHandler>>,
        mut multipart: Multipart,
    ) -> Response {
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    return ApiResponse::error("INVALID_MULTIPART", e.body_text(), None)
                        .into_response_with(e.status());
                }
            };

            // Plain form fields carry no filename.
            let Some(filename) = field.file_name().map(str::to_string) else {
                continue;
            };

            let data = match field.bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(e) => {
                    return ApiResponse::error("INVALID_MULTIPART", e.body_text(), None)
                        .into_response_with(e.status());
                }
            };

            let request = UploadDocumentRequest { filename, data };

            return match handler.upload_use_case.execute(request).await {
                Ok(response) => {
                    (StatusCode::OK, Json(UploadResponseDto::from(response))).into_response()
                }
                Err(e) => {
                    let (status, code) = upload_error_status(&e);
                    if status.is_server_error() {
                        tracing::error!("Upload failed: {}", e);
                    }
                    ApiResponse::error(code, e.to_string(), None).into_response_with(status)
                }
            };
        }

        ApiResponse::error(
            "NO_FILE_PROVIDED",
            "No file provided in the request".to_string(),
            None,
        )
        .into_response_with(StatusCode::BAD_REQUEST)
    }

    pub async fn list_documents(State(handler): State<Arc<DocumentHandler>>) -> Response {
        match handler.list_documents_use_case.execute().await {
            Ok(documents) => {
                let dtos: Vec<DocumentResponseDto> =
                    documents.into_iter().map(DocumentResponseDto::from).collect();
                (StatusCode::OK, Json(dtos)).into_response()
            }
            Err(e) => {
                tracing::error!("Listing documents failed: {}", e);
                ApiResponse::error("LIST_FAILED", e.to_string(), None)
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    pub async fn delete_document(
        State(handler): State<Arc<DocumentHandler>>,
        Json(payload): Json<DeleteRequestDto>,
    ) -> Response {
        let file_id = payload.file_id;

        match handler.delete_document_use_case.execute(file_id).await {
            Ok(outcome) if outcome.is_complete() => (
                StatusCode::OK,
                Json(MessageResponseDto {
                    message: outcome.message(file_id),
                }),
            )
                .into_response(),
            Ok(outcome) => (
                StatusCode::OK,
                Json(ErrorMessageDto {
                    error: outcome.message(file_id),
                }),
            )
                .into_response(),
            Err(e @ DeleteDocumentError::NotFound(_)) => {
                ApiResponse::error("NOT_FOUND", e.to_string(), None)
                    .into_response_with(StatusCode::NOT_FOUND)
            }
            Err(e) => {
                tracing::error!("Delete of {} failed: {}", file_id, e);
                ApiResponse::error("DELETE_FAILED", e.to_string(), None)
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

fn upload_error_status(error: &UploadDocumentError) -> (StatusCode, &'static str) {
    match error {
        UploadDocumentError::UnsupportedFileType(_) => {
            (StatusCode::BAD_REQUEST, "UNSUPPORTED_FILE_TYPE")
        }
        UploadDocumentError::ValidationError(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
        UploadDocumentError::DuplicateFile(_) => (StatusCode::CONFLICT, "DUPLICATE_FILE"),
        UploadDocumentError::IndexingFailed(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INDEXING_FAILED")
        }
        UploadDocumentError::RepositoryError(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAILED")
        }
    }
}
