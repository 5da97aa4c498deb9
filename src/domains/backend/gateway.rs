//! Outbound calls to the order-management backend.
//!
//! One [`BackendRequest`] maps to exactly one HTTP call. The gateway neither
//! retries nor caches nor reshapes the payload; interpreting not-found
//! responses and normalizing shapes is the calling tool's job.

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::error::BackendError;
use crate::core::config::BackendConfig;

/// HTTP method of a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A single backend call: method, path segments below the base URL, and an
/// optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub body: Option<Value>,
}

impl BackendRequest {
    /// A GET request for the given path segments.
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
        }
    }

    /// A POST request carrying `body` as JSON.
    pub fn post<I, S>(segments: I, body: Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Post,
            segments: segments.into_iter().map(Into::into).collect(),
            body: Some(body),
        }
    }

    /// Path below the base URL, e.g. `/order_detail/1234`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Capability to reach the backend.
///
/// Tools receive this as `Arc<dyn BackendGateway>` so tests can swap in a
/// fake.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Perform the call and return the decoded JSON payload.
    async fn fetch(&self, request: BackendRequest) -> Result<Value, BackendError>;
}

/// reqwest-backed gateway against a fixed base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Build a gateway from configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| BackendError::InvalidUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::transport(&e))?;

        Ok(Self { client, base_url })
    }

    /// The base URL all request paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve the request's path segments against the base URL.
    ///
    /// Each segment is percent-encoded, so identifiers cannot escape their
    /// path position.
    pub fn url_for(&self, request: &BackendRequest) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }
}

#[async_trait]
impl BackendGateway for HttpBackend {
    #[instrument(skip_all, fields(method = ?request.method, path = %request.path()))]
    async fn fetch(&self, request: BackendRequest) -> Result<Value, BackendError> {
        let url = self.url_for(&request)?;
        debug!("Calling backend: {:?} {}", request.method, url);

        let builder = match request.method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => {
                let builder = self.client.post(url.clone());
                match &request.body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        };

        let response = builder
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Backend request to {} failed: {}", url, e);
                BackendError::transport(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .extensions()
                .get::<ReasonPhrase>()
                .map(|r| String::from_utf8_lossy(r.as_bytes()).into_owned());
            warn!("Backend returned {} for {}", status, url);
            return Err(BackendError::status_with_reason(status.as_u16(), reason));
        }

        response.json::<Value>().await.map_err(|e| {
            error!("Backend response from {} was not valid JSON: {}", url, e);
            BackendError::transport(&e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base_url: &str) -> HttpBackend {
        HttpBackend::new(&BackendConfig {
            base_url: base_url.to_string(),
            timeout_secs: None,
            validate_responses: false,
        })
        .unwrap()
    }

    #[test]
    fn test_url_for_get() {
        let gateway = backend("https://orders.example.com/");
        let url = gateway
            .url_for(&BackendRequest::get(["order_detail", "12345"]))
            .unwrap();
        assert_eq!(url.as_str(), "https://orders.example.com/order_detail/12345");
    }

    #[test]
    fn test_url_for_keeps_base_path_and_trailing_slash() {
        let gateway = backend("https://orders.example.com/api/v1");
        let url = gateway
            .url_for(&BackendRequest::post(
                ["product_descriptions", ""],
                serde_json::json!({"skus": []}),
            ))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://orders.example.com/api/v1/product_descriptions/"
        );
    }

    #[test]
    fn test_url_for_encodes_segments() {
        let gateway = backend("https://orders.example.com/");
        let url = gateway
            .url_for(&BackendRequest::get(["email", "../admin"]))
            .unwrap();
        assert_eq!(url.as_str(), "https://orders.example.com/email/..%2Fadmin");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = HttpBackend::new(&BackendConfig {
            base_url: "not a url".to_string(),
            timeout_secs: Some(5),
            validate_responses: false,
        })
        .unwrap_err();
        assert_eq!(err, BackendError::InvalidUrl("not a url".to_string()));

        let err = HttpBackend::new(&BackendConfig {
            base_url: "mailto:orders@example.com".to_string(),
            timeout_secs: None,
            validate_responses: false,
        })
        .unwrap_err();
        assert!(matches!(err, BackendError::InvalidUrl(_)));
    }

    #[test]
    fn test_request_path() {
        assert_eq!(
            BackendRequest::get(["order_overview", "9"]).path(),
            "/order_overview/9"
        );
        assert_eq!(
            BackendRequest::post(["product_descriptions", ""], Value::Null).path(),
            "/product_descriptions/"
        );
    }
}
