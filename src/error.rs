use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `rafiq`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum RafiqError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── REST API ────────────────────────────────────────────────────────
    #[error("api: {0}")]
    Api(#[from] ApiError),

    // ── Chat channel ────────────────────────────────────────────────────
    #[error("channel: {0}")]
    Channel(#[from] ChannelError),

    // ── Durable client state ────────────────────────────────────────────
    #[error("state: {0}")]
    State(#[from] StateError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── REST API errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned {status}: {detail}")]
    Service { status: u16, detail: String },

    #[error("authentication required")]
    AuthRequired,
}

impl ApiError {
    /// True for responses the service rejected because the bearer credential
    /// is missing, expired, or insufficient.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::AuthRequired | Self::Service { status: 401 | 403, .. }
        )
    }
}

// ─── Chat channel errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("send failed: {0}")]
    Send(String),
}

// ─── Durable client state errors ─────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to load state file: {0}")]
    Load(String),

    #[error("failed to persist state file: {0}")]
    Persist(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, RafiqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = RafiqError::Config(ConfigError::Validation("bad port".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn api_service_error_displays_status_and_detail() {
        let err = RafiqError::Api(ApiError::Service {
            status: 401,
            detail: "Invalid email or password".into(),
        });
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Invalid email or password"));
    }

    #[test]
    fn api_error_classifies_auth_failures() {
        assert!(ApiError::AuthRequired.is_auth());
        assert!(
            ApiError::Service {
                status: 403,
                detail: String::new()
            }
            .is_auth()
        );
        assert!(
            !ApiError::Service {
                status: 500,
                detail: String::new()
            }
            .is_auth()
        );
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let rafiq_err: RafiqError = anyhow_err.into();
        assert!(rafiq_err.to_string().contains("something went wrong"));
    }

    #[test]
    fn channel_error_displays_correctly() {
        let err = RafiqError::Channel(ChannelError::Connect("refused".into()));
        assert!(err.to_string().contains("refused"));
    }
}
