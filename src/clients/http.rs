use crate::clients::error::ClientError;
use crate::clients::types::RetryPolicy;
use crate::models::ApiResponse;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Pause between two attempts of the same request
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(250);

/// Shape of an error reply body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Shared HTTP core for the room and booking clients
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    backoff: Duration,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:3000/api`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hotel-desk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            backoff: DEFAULT_BACKOFF,
        })
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ClientError> {
        self.send(Method::GET, path, query, None, RetryPolicy::Read)
            .await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<ApiResponse<T>, ClientError> {
        self.send(Method::POST, path, &[], Some(&body), RetryPolicy::Mutation)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ClientError> {
        self.send(Method::DELETE, path, &[], None, RetryPolicy::Mutation)
            .await
    }

    /// Issue a request, re-sending it on transient failure as `policy` allows
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        policy: RetryPolicy,
    ) -> Result<ApiResponse<T>, ClientError> {
        let url = self.url(path);
        let attempts = policy.attempts();
        let mut attempt = 1;

        loop {
            debug!(%method, %url, attempt, "sending request");

            match self.attempt(method.clone(), &url, query, body).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_transient() && attempt < attempts => {
                    warn!(%method, %url, attempt, error = %err, "request failed, retrying");
                    tokio::time::sleep(self.backoff).await;
                    attempt += 1;
                }
                Err(err) => {
                    error!(%method, %url, attempt, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<ApiResponse<T>, ClientError> {
        let mut request = self.client.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.error);
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        decode_envelope(status.as_u16(), &text)
    }
}

/// Decode a 2xx body into the typed envelope.
///
/// An envelope with `success: false` is treated as a server error even
/// though the status was 2xx.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    text: &str,
) -> Result<ApiResponse<T>, ClientError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ClientError::Decode(e.to_string()))?;

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Err(ClientError::Server { status, message });
    }

    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}
