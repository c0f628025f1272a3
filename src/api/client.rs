use crate::config::Config;
use crate::error::ApiError;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Acknowledgment body used by several mutation endpoints.
#[derive(Debug, Deserialize)]
pub struct Ack {
    pub message: String,
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

pub fn build_http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Authenticated client for the assistant service's REST surface.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &Config, token: Option<String>) -> Self {
        Self::with_base_url(config.server.api_base(), token)
    }

    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            client: build_http_client(),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Bail out before the wire when an endpoint requires a credential we
    /// do not have.
    pub(crate) fn require_token(&self) -> Result<(), ApiError> {
        if self.token.is_some() {
            Ok(())
        } else {
            Err(ApiError::AuthRequired)
        }
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            // FastAPI-style error bodies carry a `detail` string.
            let detail = match response.json::<ErrorBody>().await {
                Ok(body) => body.detail,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            Err(ApiError::Service {
                status: status.as_u16(),
                detail,
            })
        }
    }
}
