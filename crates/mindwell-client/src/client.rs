use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use mindwell_types::api::ErrorBody;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the MindWell REST API.
///
/// Cloning is cheap and clones share the session token, so every screen can
/// hold its own handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("API URL '{}': {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "API URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(CONNECT_TIMEOUT))
            .build()?;

        Ok(Self {
            http,
            base,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    // -- Session token --

    pub fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    // -- Request helpers --

    /// Join percent-encoded path segments onto the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("API URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get_json<R: DeserializeOwned>(&self, url: Url) -> Result<R> {
        debug!("GET {}", url);
        self.execute(self.http.get(url)).await
    }

    pub(crate) async fn post_json<B, R>(&self, url: Url, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("POST {}", url);
        self.execute(self.http.post(url).json(body)).await
    }

    /// POST where every argument travels in the query string.
    pub(crate) async fn post_empty<R: DeserializeOwned>(&self, url: Url) -> Result<R> {
        debug!("POST {}", url);
        self.execute(self.http.post(url)).await
    }

    pub(crate) async fn delete_json<R: DeserializeOwned>(&self, url: Url) -> Result<R> {
        debug!("DELETE {}", url);
        self.execute(self.http.delete(url)).await
    }

    async fn execute<R: DeserializeOwned>(&self, req: RequestBuilder) -> Result<R> {
        let req = match self.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let detail = error_detail(status, &body);
            warn!(status = status.as_u16(), "Request rejected: {}", detail);
            return Err(ClientError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let mut value: Value =
            serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        drop_duplicate_ids(&mut value);
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Documents may carry both `_id` and `id`; models accept either, not both.
fn drop_duplicate_ids(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("id") {
                map.remove("_id");
            }
            map.values_mut().for_each(drop_duplicate_ids);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_duplicate_ids),
        _ => {}
    }
}

/// Pull a readable message out of an error response.
fn error_detail(status: StatusCode, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        let text = parsed.detail_text();
        if !text.is_empty() {
            return text;
        }
    }
    let raw = String::from_utf8_lossy(body);
    let raw = raw.trim();
    if raw.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        raw.chars().take(200).collect()
    }
}
