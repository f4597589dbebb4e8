use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::DocumentKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    filename: String,
    file_size: Option<i64>,
    upload_timestamp: DateTime<Utc>,
}

impl Document {
    pub fn new(filename: String, file_size: Option<i64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            file_size,
            upload_timestamp: Utc::now(),
        }
    }

    /// Rebuilds a stored document without generating a new identity.
    pub fn restore(
        id: Uuid,
        filename: String,
        file_size: Option<i64>,
        upload_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            filename,
            file_size,
            upload_timestamp,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn file_size(&self) -> Option<i64> {
        self.file_size
    }

    pub fn upload_timestamp(&self) -> DateTime<Utc> {
        self.upload_timestamp
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_filename(&self.filename)
    }
}
