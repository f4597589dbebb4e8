use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::ChatLog;
use crate::domain::repositories::{ChatLogRepository, ChatLogRepositoryError};
use crate::infrastructure::database::models::{ChatLogModel, NewChatLogModel};
use crate::infrastructure::database::schema::chat_logs::dsl::{chat_logs, created_at, session_id};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresChatLogRepository {
    pool: DbPool,
}

impl PostgresChatLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatLogRepository for PostgresChatLogRepository {
    async fn append(&self, log: &ChatLog) -> Result<(), ChatLogRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatLogRepositoryError::DatabaseError(e.to_string()))?;

        diesel::insert_into(chat_logs)
            .values(&NewChatLogModel::from(log))
            .execute(&mut conn)
            .map_err(|e| ChatLogRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_session(
        &self,
        session: &str,
    ) -> Result<Vec<ChatLog>, ChatLogRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatLogRepositoryError::DatabaseError(e.to_string()))?;

        let rows: Vec<ChatLogModel> = chat_logs
            .filter(session_id.eq(session))
            .order(created_at.asc())
            .select(ChatLogModel::as_select())
            .load(&mut conn)
            .map_err(|e| ChatLogRepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(ChatLog::from).collect())
    }
}
