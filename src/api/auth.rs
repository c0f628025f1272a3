use super::client::{Ack, ApiClient};
use crate::error::ApiError;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: String,
}

fn default_active() -> bool {
    true
}

/// Login returns the user alongside the token so the client can skip a
/// follow-up `/me` call.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

impl ApiClient {
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.execute(
            self.request(Method::POST, "/api/auth/login")
                .json(credentials),
        )
        .await
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<Token, ApiError> {
        self.execute(
            self.request(Method::POST, "/api/auth/register")
                .json(credentials),
        )
        .await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.require_token()?;
        self.execute(self.request(Method::GET, "/api/auth/me")).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.require_token()?;
        let _: Ack = self
            .execute(self.request(Method::POST, "/api/auth/logout"))
            .await?;
        Ok(())
    }
}
