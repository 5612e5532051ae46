// src/core/net_client.rs
//! HTTP client for the Net API - every outbound call goes through `request`

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

use crate::core::error::{ApiError, ApiResult};
use crate::core::session::Session;
use crate::types::response::{error_message, unwrap_envelope};

pub const DEFAULT_NET_API_BASE_URL: &str = "https://net-315108406092.asia-south1.run.app";

const USER_AGENT: &str = concat!("net-studio/", env!("CARGO_PKG_VERSION"));

/// Method, body and extra headers of one call. Defaults to a bare GET.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    pub fn patch() -> Self {
        Self::with_method(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::with_method(Method::DELETE)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Body)?);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct NetClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl NetClient {
    /// No timeout or retry policy is configured: one attempt per call,
    /// bounded only by the HTTP stack's defaults.
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> ApiResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Issue one call and deserialize the normalized body into `T`.
    pub async fn request<T>(&self, endpoint: &str, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(endpoint);
        let value = self.request_value(endpoint, options).await?;
        serde_json::from_value(value).map_err(|source| ApiError::Parse { url, source })
    }

    /// Issue one call and return the normalized JSON.
    ///
    /// Single-object envelopes come back unwrapped; list envelopes and bare
    /// action results come back as sent.
    pub async fn request_value(&self, endpoint: &str, options: RequestOptions) -> ApiResult<Value> {
        let url = self.url_for(endpoint);
        let headers = self.compose_headers(&options.headers)?;

        info!("Calling Net API: {} {}", options.method, url);

        let mut builder = self
            .client
            .request(options.method.clone(), &url)
            .headers(headers);
        if let Some(body) = &options.body {
            let payload = serde_json::to_vec(body).map_err(ApiError::Body)?;
            builder = builder.body(payload);
        }

        let response = builder.send().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = error_message(status, &error_text);
            error!("Net API error {} for {} {}: {}", status, options.method, url, message);
            return Err(ApiError::RequestFailed { status, message });
        }

        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;
        let json: Value =
            serde_json::from_slice(&bytes).map_err(|source| ApiError::Parse { url, source })?;

        Ok(unwrap_envelope(json))
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// JSON content type and bearer credential, then caller headers on top.
    fn compose_headers(&self, extra: &[(String, String)]) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                ApiError::InvalidHeader {
                    name: AUTHORIZATION.to_string(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        } else {
            debug!("No credential in session, sending unauthenticated request");
        }

        for (name, value) in extra {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(token: Option<&str>) -> NetClient {
        let session = Arc::new(Session::ephemeral(token.map(str::to_string)));
        NetClient::new("https://net.example/", session).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client(None);
        assert_eq!(client.base_url(), "https://net.example");
        assert_eq!(client.url_for("/v1/users/me"), "https://net.example/v1/users/me");
    }

    #[test]
    fn test_authorization_only_with_token() {
        let headers = client(Some("abc123")).compose_headers(&[]).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer abc123");
        assert_eq!(headers[CONTENT_TYPE], "application/json");

        let headers = client(None).compose_headers(&[]).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_caller_headers_override_defaults() {
        let extra = vec![
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("Authorization".to_string(), "Bearer other".to_string()),
        ];
        let headers = client(Some("abc123")).compose_headers(&extra).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers[AUTHORIZATION], "Bearer other");
    }

    #[test]
    fn test_invalid_caller_header_is_rejected() {
        let extra = vec![("bad header".to_string(), "x".to_string())];
        let err = client(None).compose_headers(&extra).unwrap_err();
        assert!(matches!(err, ApiError::InvalidHeader { .. }));
    }

    #[test]
    fn test_token_is_read_per_request() {
        let client = client(None);
        client.session().set_token(Some("late".to_string())).unwrap();
        let headers = client.compose_headers(&[]).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer late");
    }
}
