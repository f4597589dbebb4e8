use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Document as DomainDocument;
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub filename: String,
    pub file_size: Option<i64>,
    pub upload_timestamp: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentModel {
    pub id: Uuid,
    pub filename: String,
    pub file_size: Option<i64>,
    pub upload_timestamp: DateTime<Utc>,
}

impl From<&DomainDocument> for NewDocumentModel {
    fn from(document: &DomainDocument) -> Self {
        Self {
            id: document.id(),
            filename: document.filename().to_string(),
            file_size: document.file_size(),
            upload_timestamp: document.upload_timestamp(),
        }
    }
}

impl From<DocumentModel> for DomainDocument {
    fn from(model: DocumentModel) -> Self {
        DomainDocument::restore(
            model.id,
            model.filename,
            model.file_size,
            model.upload_timestamp,
        )
    }
}
