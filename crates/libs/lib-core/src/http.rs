//! # HTTP Transport Seam
//!
//! Minimal request/response types shared by the risk API client and the
//! Horizon network check. The browser crate implements [`HttpTransport`] on
//! top of `gloo-net`; tests use scripted transports.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::GuardianError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, GuardianError> {
        let value = serde_json::to_value(body)
            .map_err(|e| GuardianError::RemoteFailure(format!("could not encode request: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, GuardianError> {
        serde_json::from_str(&self.body)
            .map_err(|e| GuardianError::RemoteFailure(format!("unexpected response: {}", e)))
    }

    /// The `detail` field of an error body, if present.
    pub fn detail(&self) -> Option<String> {
        let value: Value = serde_json::from_str(&self.body).ok()?;
        value.get("detail")?.as_str().map(str::to_string)
    }
}

/// The request never produced a response (offline, CORS, aborted).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("network error: {0}")]
pub struct TransportError(pub String);

impl From<TransportError> for GuardianError {
    fn from(err: TransportError) -> Self {
        GuardianError::RemoteFailure(err.to_string())
    }
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let req = HttpRequest::post("http://api/x")
            .json(&json!({ "a": 1 }))
            .unwrap()
            .bearer(Some("tok".into()));
        assert_eq!(req.method.as_str(), "POST");
        assert_eq!(req.body, Some(json!({ "a": 1 })));
        assert_eq!(req.bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn test_response_detail() {
        let res = HttpResponse::new(404, r#"{"detail":"User not found"}"#);
        assert!(!res.is_success());
        assert_eq!(res.detail().as_deref(), Some("User not found"));
        assert_eq!(HttpResponse::new(500, "oops").detail(), None);
    }
}
