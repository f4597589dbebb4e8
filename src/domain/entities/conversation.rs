use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ModelName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }
}

/// One persisted question/answer exchange of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLog {
    id: Uuid,
    session_id: String,
    user_query: String,
    response: String,
    model: ModelName,
    created_at: DateTime<Utc>,
}

impl ChatLog {
    pub fn new(session_id: String, user_query: String, response: String, model: ModelName) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            user_query,
            response,
            model,
            created_at: Utc::now(),
        }
    }

    pub fn restore(
        id: Uuid,
        session_id: String,
        user_query: String,
        response: String,
        model: ModelName,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            user_query,
            response,
            model,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_query(&self) -> &str {
        &self.user_query
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn model(&self) -> ModelName {
        self.model
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The exchange as a user turn followed by an assistant turn.
    pub fn to_turns(&self) -> [ConversationTurn; 2] {
        [
            ConversationTurn::user(self.user_query.clone()),
            ConversationTurn::assistant(self.response.clone()),
        ]
    }
}

/// Flattens ordered chat logs into conversation history.
pub fn history_from_logs(logs: &[ChatLog]) -> Vec<ConversationTurn> {
    logs.iter().flat_map(|log| log.to_turns()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_from_logs() {
        let logs = vec![
            ChatLog::new(
                "s1".to_string(),
                "What is the uptime?".to_string(),
                "99.9%".to_string(),
                ModelName::Gpt4oMini,
            ),
            ChatLog::new(
                "s1".to_string(),
                "And the credits?".to_string(),
                "10% of the monthly fee".to_string(),
                ModelName::Gpt4oMini,
            ),
        ];

        let history = history_from_logs(&logs);

        assert_eq!(history.len(), 4);
        assert_eq!(history[0], ConversationTurn::user("What is the uptime?"));
        assert_eq!(history[1], ConversationTurn::assistant("99.9%"));
        assert_eq!(history[2].role, TurnRole::User);
        assert_eq!(history[3].text, "10% of the monthly fee");
    }

    #[test]
    fn test_empty_history() {
        assert!(history_from_logs(&[]).is_empty());
    }
}
