use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::ContentChunk as DomainChunk;
use crate::infrastructure::database::schema::content_chunks;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(belongs_to(super::DocumentModel, foreign_key = document_id))]
#[diesel(table_name = content_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContentChunkModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub chunk_text: String,
    pub chunk_index: i32,
    pub page_number: Option<i32>,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = content_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewContentChunkModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub chunk_text: String,
    pub chunk_index: i32,
    pub page_number: Option<i32>,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainChunk> for NewContentChunkModel {
    fn from(chunk: &DomainChunk) -> Self {
        Self {
            id: chunk.id(),
            document_id: chunk.document_id(),
            chunk_text: chunk.chunk_text().to_string(),
            chunk_index: chunk.chunk_index(),
            page_number: chunk.page_number(),
            source: chunk.source().map(|s| s.to_string()),
            created_at: chunk.created_at(),
        }
    }
}

impl From<ContentChunkModel> for DomainChunk {
    fn from(model: ContentChunkModel) -> Self {
        DomainChunk::restore(
            model.id,
            model.document_id,
            model.chunk_text,
            model.chunk_index,
            model.page_number,
            model.source,
            model.created_at,
        )
    }
}
