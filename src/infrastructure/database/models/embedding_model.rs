use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pgvector::Vector;
use uuid::Uuid;

use crate::infrastructure::database::schema::embeddings;

#[derive(Debug, Insertable)]
#[diesel(table_name = embeddings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewEmbeddingModel {
    pub id: Uuid,
    pub content_chunk_id: Uuid,
    pub model_name: String,
    pub embedding: Vector,
    pub generated_at: DateTime<Utc>,
}

impl NewEmbeddingModel {
    pub fn new(content_chunk_id: Uuid, model_name: String, embedding: Vector) -> Self {
        Self {
            id: Uuid::new_v4(),
            content_chunk_id,
            model_name,
            embedding,
            generated_at: Utc::now(),
        }
    }
}
