use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::repositories::{DocumentRepository, DocumentRepositoryError};
use crate::infrastructure::database::models::{DocumentModel, NewDocumentModel};
use crate::infrastructure::database::schema::documents::dsl::{documents, filename, upload_timestamp};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let new_document = NewDocumentModel::from(document);

        diesel::insert_into(documents)
            .values(&new_document)
            .execute(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    DocumentRepositoryError::DuplicateError(document.filename().to_string())
                }
                other => DocumentRepositoryError::DatabaseError(other.to_string()),
            })?;

        Ok(())
    }

    async fn find_by_id(&self, document_id: Uuid) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents
            .find(document_id)
            .select(DocumentModel::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Document::from))
    }

    async fn find_by_filename(
        &self,
        name: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents
            .filter(filename.eq(name))
            .select(DocumentModel::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Document::from))
    }

    async fn find_all(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents
            .order(upload_timestamp.desc())
            .select(DocumentModel::as_select())
            .load(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Document::from).collect())
    }

    async fn list_filenames(&self) -> Result<Vec<String>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        documents
            .order(upload_timestamp.desc())
            .select(filename)
            .load::<String>(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))
    }

    async fn delete(&self, document_id: Uuid) -> Result<bool, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(documents.find(document_id))
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }
}
