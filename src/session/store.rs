use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const STATE_VERSION: u32 = 1;

fn default_state_version() -> u32 {
    STATE_VERSION
}

/// On-disk shape of the durable client state.
///
/// Two fixed keys: the bearer credential and the chat session identifier.
/// Read at startup, written when a value is first established or cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateFile {
    #[serde(default = "default_state_version")]
    version: u32,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            token: None,
            session_id: None,
        }
    }
}

/// Durable key-value state for this client profile.
///
/// Every mutation persists immediately; a missing file reads as empty state.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    state: StateFile,
}

impl StateStore {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            StateFile::default()
        };

        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        self.state.token = Some(token.into());
        self.persist()
    }

    pub fn clear_token(&mut self) -> Result<()> {
        self.state.token = None;
        self.persist()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.state.session_id.as_deref()
    }

    pub fn set_session_id(&mut self, session_id: impl Into<String>) -> Result<()> {
        self.state.session_id = Some(session_id.into());
        self.persist()
    }

    pub fn clear_session_id(&mut self) -> Result<()> {
        self.state.session_id = None;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let contents =
            serde_json::to_string_pretty(&self.state).context("Failed to serialize state")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}
