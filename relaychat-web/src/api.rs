use crate::config::FrontendConfig;
use crate::storage;
use once_cell::unsync::OnceCell;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use shared::models::GatewayErrorBody;
use thiserror::Error;
use tracing::{debug, warn};

const LOGIN_PATH: &str = "/login";

thread_local! {
    static SHARED_CLIENT: OnceCell<GatewayClient> = OnceCell::new();
}

/// Failure talking to the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-success status
    #[error("gateway returned {status}: {body}")]
    Status { status: u16, body: GatewayErrorBody },
}

impl GatewayError {
    /// Message for the UI: the gateway's own wording when it sent one.
    pub fn describe_or(&self, fallback: &str) -> String {
        match self {
            Self::Status { body, .. } => body.describe_or(fallback),
            Self::Transport(err) => {
                let text = err.to_string();
                if text.is_empty() { fallback.to_owned() } else { text }
            }
        }
    }
}

/// HTTP client for the RelayChat API gateway.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    base_url: String,
    client: Client,
}

impl GatewayClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Client for the configured gateway, built once per thread.
    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| Self::new(FrontendConfig::new().gateway_url()))
                .clone()
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the stored credentials to an outgoing request.
    fn authorize(request: RequestBuilder) -> RequestBuilder {
        auth_headers(storage::session_token(), storage::session_user_id())
            .into_iter()
            .fold(request, |request, (name, value)| request.header(name, value))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = Self::authorize(request).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            expire_session();
        }
        Ok(response)
    }

    async fn json_or_error(response: Response) -> Result<Value, GatewayError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or_else(|_| GatewayErrorBody {
            detail: None,
            message: Some(text),
        });
        Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// List the threads of a channel as raw gateway records.
    ///
    /// A missing channel id short-circuits to an empty list without a request.
    pub async fn list_threads(&self, channel_id: &str) -> Result<Value, GatewayError> {
        if channel_id.is_empty() {
            warn!("list_threads called without a channel id");
            return Ok(Value::Array(Vec::new()));
        }
        let url = self.api_url(&threads_path(channel_id));
        debug!(channel_id, "fetching channel threads");
        let response = self.send(self.client.get(url)).await?;
        Self::json_or_error(response).await
    }

    /// Fetch a single thread by its gateway identifier.
    pub async fn get_thread(&self, thread_id: &str) -> Result<Value, GatewayError> {
        let url = self.api_url(&thread_path(thread_id));
        let response = self.send(self.client.get(url)).await?;
        Self::json_or_error(response).await
    }

    /// Create a thread in a channel and return the gateway's record of it.
    ///
    /// The gateway takes the fields as query parameters on an empty POST.
    pub async fn create_thread(
        &self,
        channel_id: &str,
        user_id: Option<&str>,
        thread_name: &str,
    ) -> Result<Value, GatewayError> {
        let url = self.api_url(CREATE_THREAD_PATH);
        let request = self
            .client
            .post(url)
            .query(&create_thread_params(channel_id, user_id, thread_name));
        debug!(channel_id, "creating thread");
        let response = self.send(request).await?;
        Self::json_or_error(response).await
    }

    /// Delete a thread by its gateway identifier. Any response body is ignored.
    pub async fn delete_thread(&self, thread_id: &str) -> Result<(), GatewayError> {
        let url = self.api_url(&thread_path(thread_id));
        let response = self.send(self.client.delete(url)).await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

const CREATE_THREAD_PATH: &str = "api/threads";

pub(crate) fn create_thread_params<'a>(
    channel_id: &'a str,
    user_id: Option<&'a str>,
    thread_name: &'a str,
) -> Vec<(&'static str, &'a str)> {
    let mut params = vec![("channel_id", channel_id)];
    if let Some(user_id) = user_id {
        params.push(("user_id", user_id));
    }
    params.push(("thread_name", thread_name));
    params
}

pub(crate) fn threads_path(channel_id: &str) -> String {
    format!("api/channels/{channel_id}/threads")
}

pub(crate) fn thread_path(thread_id: &str) -> String {
    format!("api/threads/{thread_id}")
}

/// Headers added to every gateway request.
pub(crate) fn auth_headers(
    token: Option<String>,
    user_id: Option<String>,
) -> Vec<(&'static str, String)> {
    let mut headers = Vec::with_capacity(2);
    if let Some(token) = token {
        headers.push(("Authorization", format!("Bearer {token}")));
    }
    if let Some(user_id) = user_id {
        headers.push(("X-User-Id", user_id));
    }
    headers
}

/// Drop the stored session and send the user back to the login route.
fn expire_session() {
    warn!("gateway rejected the session, signing out");
    storage::clear_session();
    if let Some(window) = web_sys::window()
        && let Err(err) = window.location().set_href(LOGIN_PATH)
    {
        warn!(error = ?err, "failed to redirect to login");
    }
}
