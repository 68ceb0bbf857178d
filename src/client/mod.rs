//! HTTP adapter for the board API.
//!
//! [`Transport`] is the seam the store talks through. [`HttpClient`] is the
//! production implementation: a fixed base URL plus a bearer token read from
//! persisted storage right before every request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::persist::{read_token, Storage};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the decoded JSON body.
    /// An empty success body decodes as `Value::Null`.
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ClientError>;
}

pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
    storage: Arc<dyn Storage>,
    request_logging: bool,
}

impl HttpClient {
    pub fn new(base_url: Url, storage: Arc<dyn Storage>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            storage,
            request_logging: false,
        }
    }

    pub fn from_config(config: &ApiConfig, storage: Arc<dyn Storage>) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)?;

        let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            storage,
            request_logging: config.request_logging,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, ClientError> {
        // Keep any path prefix on the base URL (e.g. https://host/api)
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }

    fn bearer_token(&self) -> Option<String> {
        match read_token(self.storage.as_ref()) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "could not read stored token, sending request without it");
                None
            }
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ClientError> {
        let url = self.url_for(path)?;
        if self.request_logging {
            debug!(%method, %url, "sending request");
        }

        let mut request = self.client.request(method.clone(), url);
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default().trim().to_string();
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        if self.request_logging {
            debug!(%method, path, status = status.as_u16(), bytes = bytes.len(), "response received");
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
