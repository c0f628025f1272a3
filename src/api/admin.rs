use super::client::{Ack, ApiClient};
use crate::error::ApiError;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
    pub admin_users: u64,
    pub users_created_today: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: String,
    #[serde(default)]
    pub conversations_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConversation {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub messages_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminUserDetail {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: String,
    #[serde(default)]
    pub conversations: Vec<AdminConversation>,
    #[serde(default)]
    pub total_messages: u64,
}

/// Partial update: absent fields mean "leave unchanged" and are omitted
/// from the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.is_admin.is_none() && self.is_active.is_none() && self.name.is_none()
    }
}

impl ApiClient {
    pub async fn admin_stats(&self) -> Result<DashboardStats, ApiError> {
        self.require_token()?;
        self.execute(self.request(Method::GET, "/api/admin/stats"))
            .await
    }

    pub async fn admin_users(&self, skip: usize, limit: usize) -> Result<Vec<AdminUser>, ApiError> {
        self.require_token()?;
        self.execute(
            self.request(Method::GET, "/api/admin/users")
                .query(&[("skip", skip), ("limit", limit)]),
        )
        .await
    }

    pub async fn admin_user(&self, id: i64) -> Result<AdminUserDetail, ApiError> {
        self.require_token()?;
        self.execute(self.request(Method::GET, &format!("/api/admin/users/{id}")))
            .await
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<AdminUser, ApiError> {
        self.require_token()?;
        self.execute(
            self.request(Method::PUT, &format!("/api/admin/users/{id}"))
                .json(update),
        )
        .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.require_token()?;
        let _: Ack = self
            .execute(self.request(Method::DELETE, &format!("/api/admin/users/{id}")))
            .await?;
        Ok(())
    }
}
