pub mod store;

pub use store::StateStore;

use chrono::Utc;

/// Identity attached to every outbound chat envelope.
///
/// Built once at chat startup and handed to the channel manager; the manager
/// never reads durable storage itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Durable conversation identity; outlives any single channel connection.
    pub session_id: String,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
}

impl SessionContext {
    pub fn anonymous(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: None,
            user_email: None,
        }
    }

    pub fn authenticated(
        session_id: impl Into<String>,
        user_id: impl Into<String>,
        user_email: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: Some(user_id.into()),
            user_email: Some(user_email.into()),
        }
    }
}

/// Mint a fresh time-derived session identifier.
pub fn mint_session_id() -> String {
    format!("session-{}", Utc::now().timestamp_millis())
}
