use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentChunk {
    id: Uuid,
    document_id: Uuid,
    chunk_text: String,
    chunk_index: i32,
    page_number: Option<i32>,
    source: Option<String>,
    created_at: DateTime<Utc>,
}

impl ContentChunk {
    pub fn new(
        document_id: Uuid,
        chunk_text: String,
        chunk_index: i32,
        page_number: Option<i32>,
        source: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            chunk_text,
            chunk_index,
            page_number,
            source,
            created_at: Utc::now(),
        }
    }

    pub fn restore(
        id: Uuid,
        document_id: Uuid,
        chunk_text: String,
        chunk_index: i32,
        page_number: Option<i32>,
        source: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            document_id,
            chunk_text,
            chunk_index,
            page_number,
            source,
            created_at,
        }
    }

    // Getters
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn chunk_text(&self) -> &str {
        &self.chunk_text
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn page_number(&self) -> Option<i32> {
        self.page_number
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_text.trim().is_empty()
    }

    pub fn belongs_to(&self, document_id: Uuid) -> bool {
        self.document_id == document_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_creation() {
        let document_id = Uuid::new_v4();
        let chunk = ContentChunk::new(
            document_id,
            "Monthly uptime percentage of 99.9%.".to_string(),
            0,
            Some(3),
            Some("aws_sla.pdf".to_string()),
        );

        assert!(chunk.belongs_to(document_id));
        assert_eq!(chunk.page_number(), Some(3));
        assert_eq!(chunk.source(), Some("aws_sla.pdf"));
        assert!(!chunk.is_empty());
    }

    #[test]
    fn test_empty_chunk() {
        let chunk = ContentChunk::new(Uuid::new_v4(), "  \n ".to_string(), 0, None, None);

        assert!(chunk.is_empty());
        assert_eq!(chunk.source(), None);
    }
}
