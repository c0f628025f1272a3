use super::client::ApiClient;
use crate::error::ApiError;
use reqwest::Method;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationSummary {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub session_id: Option<String>,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub message_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationMessage {
    pub id: i64,
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub agent: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct ConversationDetail {
    pub conversation: ConversationSummary,
    pub messages: Vec<ConversationMessage>,
}

#[derive(Debug, Deserialize)]
struct DeleteOutcome {
    #[allow(dead_code)]
    status: String,
}

impl ApiClient {
    pub async fn conversations(&self, limit: usize) -> Result<Vec<ConversationSummary>, ApiError> {
        self.require_token()?;
        self.execute(
            self.request(Method::GET, "/api/conversations/")
                .query(&[("limit", limit)]),
        )
        .await
    }

    pub async fn conversation(&self, id: i64) -> Result<ConversationDetail, ApiError> {
        self.require_token()?;
        self.execute(self.request(Method::GET, &format!("/api/conversations/{id}")))
            .await
    }

    pub async fn delete_conversation(&self, id: i64) -> Result<(), ApiError> {
        self.require_token()?;
        let _: DeleteOutcome = self
            .execute(self.request(Method::DELETE, &format!("/api/conversations/{id}")))
            .await?;
        Ok(())
    }
}
