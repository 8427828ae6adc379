//! HTTP transport
//!
//! `HttpClient` is the seam between the typed API and the network; tests
//! substitute an in-memory implementation.

use async_trait::async_trait;
use http::Method;
use reqwest::Client;
use serde_json::Value;

use crate::{ClientConfig, ClientError, ClientResult};

/// Error body of the XNote server (`{"error": "..."}`)
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(alias = "message")]
    error: String,
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send one JSON request. `path` is relative to the API root
    /// (e.g. `"meals/3"`); an empty 2xx body yields `Value::Null`.
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ClientResult<Value>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    api_root: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            api_root: config.api_root(),
            token: config.token.clone(),
        })
    }

    /// API root URL (base URL + prefix)
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn handle_response(&self, response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            return Err(ClientError::from_status(status.as_u16(), message));
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ClientResult<Value> {
        let url = format!("{}/{}", self.api_root, path.trim_start_matches('/'));
        tracing::debug!(%method, %url, "XNote API request");

        let mut req = self.client.request(method, &url);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }
}
