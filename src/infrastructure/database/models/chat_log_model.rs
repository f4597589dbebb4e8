use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::ChatLog as DomainChatLog;
use crate::domain::value_objects::ModelName;
use crate::infrastructure::database::schema::chat_logs;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = chat_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatLogModel {
    pub id: Uuid,
    pub session_id: String,
    pub user_query: String,
    pub response: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = chat_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChatLogModel {
    pub id: Uuid,
    pub session_id: String,
    pub user_query: String,
    pub response: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainChatLog> for NewChatLogModel {
    fn from(log: &DomainChatLog) -> Self {
        Self {
            id: log.id(),
            session_id: log.session_id().to_string(),
            user_query: log.user_query().to_string(),
            response: log.response().to_string(),
            model: log.model().as_str().to_string(),
            created_at: log.created_at(),
        }
    }
}

impl From<ChatLogModel> for DomainChatLog {
    /// Rows written by a model that is no longer offered keep their turn under the default model.
    fn from(row: ChatLogModel) -> Self {
        let model_name = row.model.parse::<ModelName>().unwrap_or_else(|e| {
            tracing::warn!(
                "Chat log {} in session {}: {}; using {}",
                row.id,
                row.session_id,
                e,
                ModelName::default().as_str()
            );
            ModelName::default()
        });

        DomainChatLog::restore(
            row.id,
            row.session_id,
            row.user_query,
            row.response,
            model_name,
            row.created_at,
        )
    }
}
