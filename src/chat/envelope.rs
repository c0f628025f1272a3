use crate::session::SessionContext;
use serde::{Deserialize, Serialize};

/// Client→server chat envelope.
///
/// All four fields are transmitted on every send; identity fields serialize
/// as `null` for anonymous sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outbound {
    pub message: String,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub session_id: String,
}

impl Outbound {
    pub fn new(message: impl Into<String>, session: &SessionContext) -> Self {
        Self {
            message: message.into(),
            user_id: session.user_id.clone(),
            user_email: session.user_email.clone(),
            session_id: session.session_id.clone(),
        }
    }
}

/// Server→client chat envelope, dispatched on the `type` discriminator.
///
/// Unknown discriminators fall through to `Unknown` so newer service builds
/// stay compatible with older clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    Typing {
        status: bool,
    },
    AssistantMessage {
        message: String,
        timestamp: String,
    },
    Error {
        message: String,
        timestamp: String,
    },
    #[serde(other)]
    Unknown,
}

impl ServerEvent {
    /// Parse one inbound text frame. `None` means the payload was not a
    /// recognizable envelope and must be dropped.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}
