//! Authenticated request pipeline
//!
//! Every resource operation funnels through [`ObpClient::execute`]: read the
//! token, attach headers, send once, classify the outcome.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{ObpError, ObpResult};
use crate::request::ApiRequest;
use crate::settings::{SettingKey, SettingsProvider};

/// OBP Swiss sandbox endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.dev.openbankingproject.ch/v1";

/// Environment variable overriding the API base
pub const BASE_URL_ENV: &str = "OBPSWISS_API_URL";

const JSON: &str = "application/json";

/// HTTP client for the Open Banking API
#[derive(Clone)]
pub struct ObpClient {
    base_url: String,
    http: reqwest::Client,
    settings: Arc<dyn SettingsProvider>,
}

impl ObpClient {
    /// Client against the default API base
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        Self::with_base_url(settings, DEFAULT_BASE_URL)
    }

    /// Client against `OBPSWISS_API_URL` when set, else the default base
    pub fn from_env(settings: Arc<dyn SettingsProvider>) -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(settings, &base_url)
    }

    pub fn with_base_url(settings: Arc<dyn SettingsProvider>, base_url: &str) -> Self {
        Self::with_http_client(settings, base_url, reqwest::Client::new())
    }

    /// Create a client with a custom reqwest::Client
    pub fn with_http_client(
        settings: Arc<dyn SettingsProvider>,
        base_url: &str,
        http: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            settings,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn settings(&self) -> &Arc<dyn SettingsProvider> {
        &self.settings
    }

    /// Whether a token is configured right now
    pub fn has_token(&self) -> bool {
        self.settings.has_token()
    }

    /// Send one authenticated request
    ///
    /// Returns `None` when the response carried no body. Fails with
    /// [`ObpError::Configuration`] before touching the network if no token is
    /// stored.
    pub async fn execute(&self, request: ApiRequest) -> ObpResult<Option<Value>> {
        let token = self.settings.get(SettingKey::AccessToken);
        if token.is_empty() {
            return Err(ObpError::no_token());
        }

        let url = format!("{}{}", self.base_url, request.path);
        debug!(
            method = %request.method,
            path = %request.path,
            params = request.query.len(),
            "sending request"
        );

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, JSON);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, JSON)
                .body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await.map_err(ObpError::from_transport)?;
        let status = response.status();
        let text = response.text().await.map_err(ObpError::Http)?;
        debug!(status = status.as_u16(), bytes = text.len(), "received response");

        if !status.is_success() {
            let err = ObpError::from_status(status.as_u16(), &text);
            warn!(status = status.as_u16(), path = %request.path, "request failed: {}", err);
            return Err(err);
        }

        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Execute and decode a single resource
    pub(crate) async fn fetch_one<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ObpResult<Option<T>> {
        let data = self.execute(request).await?;
        decode_one(data)
    }

    /// Execute and unwrap the named array field
    pub(crate) async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        field: &str,
    ) -> ObpResult<Vec<T>> {
        let data = self.execute(request).await?;
        decode_list(data, field)
    }
}

impl fmt::Debug for ObpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObpClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.settings.has_token())
            .finish()
    }
}

/// `None` for an absent or `null` body, otherwise the decoded value
pub(crate) fn decode_one<T: DeserializeOwned>(data: Option<Value>) -> ObpResult<Option<T>> {
    match data {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

/// Named array field of the body, empty when absent or `null`
pub(crate) fn decode_list<T: DeserializeOwned>(
    data: Option<Value>,
    field: &str,
) -> ObpResult<Vec<T>> {
    match take_field(data, field) {
        None => Ok(Vec::new()),
        Some(items) => Ok(serde_json::from_value(items)?),
    }
}

/// Remove `field` from an object body; `None` when missing or `null`
pub(crate) fn take_field(data: Option<Value>, field: &str) -> Option<Value> {
    match data {
        Some(Value::Object(mut map)) => map.remove(field).filter(|v| !v.is_null()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;
    use serde_json::json;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ObpClient::with_base_url(Arc::new(MemorySettings::new()), "http://localhost:9999/v1/");
        assert_eq!(client.base_url(), "http://localhost:9999/v1");
    }

    #[test]
    fn test_debug_hides_token() {
        let client = ObpClient::new(Arc::new(MemorySettings::with_token("secret-token")));
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("has_token: true"));
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_network() {
        // Unroutable base: reaching the network would surface as a Network error
        let client = ObpClient::with_base_url(Arc::new(MemorySettings::new()), "http://127.0.0.1:1");
        let err = client.execute(ApiRequest::get("/accounts")).await.unwrap_err();
        assert!(matches!(err, ObpError::Configuration { .. }));
    }

    #[test]
    fn test_decode_list_defaults_to_empty() {
        let items: Vec<Value> = decode_list(Some(json!({})), "accounts").unwrap();
        assert!(items.is_empty());

        let items: Vec<Value> = decode_list(None, "accounts").unwrap();
        assert!(items.is_empty());

        let items: Vec<Value> = decode_list(Some(json!({ "accounts": null })), "accounts").unwrap();
        assert!(items.is_empty());

        let items: Vec<Value> =
            decode_list(Some(json!({ "accounts": [{ "id": "a1" }] })), "accounts").unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_decode_one_null_is_none() {
        let value: Option<Value> = decode_one(None).unwrap();
        assert!(value.is_none());
        let value: Option<Value> = decode_one(Some(Value::Null)).unwrap();
        assert!(value.is_none());
        let value: Option<Value> = decode_one(Some(json!({ "id": "x" }))).unwrap();
        assert_eq!(value.unwrap()["id"], "x");
    }
}
