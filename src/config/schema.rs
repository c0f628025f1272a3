use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Path to state.json (bearer token + session id) - computed, not serialized
    #[serde(skip)]
    pub state_path: PathBuf,

    /// UI locale ("en" or "ar")
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub channel: ChannelConfig,
}

fn default_locale() -> String {
    "en".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            state_path: PathBuf::new(),
            locale: default_locale(),
            server: ServerConfig::default(),
            channel: ChannelConfig::default(),
        }
    }
}

// ── Assistant service endpoint ───────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Service host (default: localhost)
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Service port (default: 8000)
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Use wss/https instead of ws/http
    #[serde(default)]
    pub tls: bool,
    /// Chat channel path on the service
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
}

fn default_server_host() -> String {
    "localhost".into()
}

fn default_server_port() -> u16 {
    8000
}

fn default_chat_path() -> String {
    "/ws/chat".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            tls: false,
            chat_path: default_chat_path(),
        }
    }
}

impl ServerConfig {
    /// Channel endpoint, scheme chosen by the `tls` flag.
    pub fn ws_url(&self) -> String {
        let scheme = if self.tls { "wss" } else { "ws" };
        format!("{scheme}://{}:{}{}", self.host, self.port, self.chat_path)
    }

    /// REST base URL, no trailing slash.
    pub fn api_base(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

// ── Chat channel behavior ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Delay before re-dialing a closed channel, in milliseconds.
    /// The service contract is a fixed 3000 ms; unbounded retries, no backoff.
    #[serde(default = "default_reconnect_ms")]
    pub reconnect_ms: u64,
}

fn default_reconnect_ms() -> u64 {
    3000
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            reconnect_ms: default_reconnect_ms(),
        }
    }
}

// ── Load / save ──────────────────────────────────────────────────

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let rafiq_dir = home.join(".rafiq");

        if !rafiq_dir.exists() {
            fs::create_dir_all(&rafiq_dir).context("Failed to create .rafiq directory")?;
        }

        Self::load_or_init_at(&rafiq_dir)
    }

    /// Load (or create with defaults) the config rooted at `dir`.
    pub fn load_or_init_at(dir: &std::path::Path) -> Result<Self> {
        let config_path = dir.join("config.toml");
        let state_path = dir.join("state.json");

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            // Set computed paths that are skipped during serialization
            config.config_path = config_path;
            config.state_path = state_path;
            Ok(config)
        } else {
            let config = Self {
                config_path,
                state_path,
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("RAFIQ_SERVER_HOST") {
            if !host.is_empty() {
                self.server.host = host;
            }
        }

        if let Ok(port_str) = std::env::var("RAFIQ_SERVER_PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                self.server.port = port;
            }
        }

        if let Ok(tls) = std::env::var("RAFIQ_SERVER_TLS") {
            match tls.as_str() {
                "1" | "true" => self.server.tls = true,
                "0" | "false" => self.server.tls = false,
                _ => {}
            }
        }

        if let Ok(locale) = std::env::var("RAFIQ_LOCALE") {
            if !locale.is_empty() {
                self.locale = locale;
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
