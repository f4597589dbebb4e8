use async_trait::async_trait;
use diesel::prelude::*;
use pgvector::{Vector, VectorExpressionMethods};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::EmbeddingProvider;
use crate::application::ports::embedding_provider::{BatchEmbeddingRequest, EmbeddingRequest};
use crate::application::ports::vector_index::{VectorIndex, VectorIndexError};
use crate::domain::entities::{ContentChunk, RetrievedChunk};
use crate::infrastructure::database::models::{
    ContentChunkModel, NewContentChunkModel, NewEmbeddingModel,
};
use crate::infrastructure::database::schema::{content_chunks, embeddings};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

const BATCH_SIZE: usize = 10;

/// Vector index stored in PostgreSQL with pgvector, ranked by cosine distance.
pub struct PgVectorIndex {
    pool: DbPool,
    embedding_provider: Arc<dyn EmbeddingProvider>,
}

impl PgVectorIndex {
    pub fn new(pool: DbPool, embedding_provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            pool,
            embedding_provider,
        }
    }

    /// Embeds chunks in batches; returns the vectors and the model that produced them.
    async fn embed_chunks(
        &self,
        chunks: &[ContentChunk],
    ) -> Result<(Vec<Vector>, String), VectorIndexError> {
        let mut vectors = Vec::with_capacity(chunks.len());
        let mut model_name = self.embedding_provider.model_name();

        for chunk_batch in chunks.chunks(BATCH_SIZE) {
            let texts: Vec<String> = chunk_batch
                .iter()
                .map(|chunk| chunk.chunk_text().to_string())
                .collect();

            let batch_response = self
                .embedding_provider
                .generate_embeddings(BatchEmbeddingRequest { texts })
                .await
                .map_err(|e| VectorIndexError::EmbeddingError(e.to_string()))?;

            if batch_response.embeddings.len() != chunk_batch.len() {
                return Err(VectorIndexError::EmbeddingError(format!(
                    "expected {} embeddings, got {}",
                    chunk_batch.len(),
                    batch_response.embeddings.len()
                )));
            }

            vectors.extend(batch_response.embeddings);
            model_name = batch_response.model_name;
        }

        Ok((vectors, model_name))
    }
}

/// Cosine distance in [0, 2] mapped to a relevance score in [0, 1].
pub fn relevance_from_distance(distance: f64) -> f32 {
    (1.0 - distance).clamp(0.0, 1.0) as f32
}

#[async_trait]
impl VectorIndex for PgVectorIndex {
    async fn add_chunks(&self, chunks: &[ContentChunk]) -> Result<usize, VectorIndexError> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let (vectors, model_name) = self.embed_chunks(chunks).await?;
        tracing::debug!("Embedded {} chunks with {}", vectors.len(), model_name);

        let new_chunks: Vec<NewContentChunkModel> =
            chunks.iter().map(NewContentChunkModel::from).collect();
        let new_embeddings: Vec<NewEmbeddingModel> = chunks
            .iter()
            .zip(vectors)
            .map(|(chunk, vector)| NewEmbeddingModel::new(chunk.id(), model_name.clone(), vector))
            .collect();

        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| VectorIndexError::DatabaseError(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(content_chunks::table)
                .values(&new_chunks)
                .execute(conn)?;
            diesel::insert_into(embeddings::table)
                .values(&new_embeddings)
                .execute(conn)
        })
        .map_err(|e| VectorIndexError::DatabaseError(e.to_string()))?;

        Ok(new_chunks.len())
    }

    async fn similarity_search_with_scores(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedChunk>, VectorIndexError> {
        if query.trim().is_empty() {
            return Err(VectorIndexError::InvalidInput(
                "Query cannot be empty".to_string(),
            ));
        }

        let query_vector = self
            .embedding_provider
            .generate_embedding(EmbeddingRequest {
                text: query.to_string(),
            })
            .await
            .map_err(|e| VectorIndexError::EmbeddingError(e.to_string()))?;

        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| VectorIndexError::DatabaseError(e.to_string()))?;

        let rows = content_chunks::table
            .inner_join(embeddings::table)
            .select((
                ContentChunkModel::as_select(),
                embeddings::embedding.cosine_distance(query_vector.clone()),
            ))
            .order(embeddings::embedding.cosine_distance(query_vector))
            .limit(k as i64)
            .load::<(ContentChunkModel, f64)>(&mut conn)
            .map_err(|e| VectorIndexError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(model, distance)| {
                RetrievedChunk::new(ContentChunk::from(model), relevance_from_distance(distance))
            })
            .collect())
    }

    async fn delete_document(&self, document_id: Uuid) -> Result<usize, VectorIndexError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| VectorIndexError::DatabaseError(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let chunk_ids = content_chunks::table
                .filter(content_chunks::document_id.eq(document_id))
                .select(content_chunks::id);

            diesel::delete(embeddings::table.filter(embeddings::content_chunk_id.eq_any(chunk_ids)))
                .execute(conn)?;

            diesel::delete(content_chunks::table.filter(content_chunks::document_id.eq(document_id)))
                .execute(conn)
        })
        .map_err(|e| VectorIndexError::DatabaseError(e.to_string()))
    }
}
