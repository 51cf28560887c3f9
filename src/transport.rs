//! The fetch-like transport seam.
//!
//! The engine talks to the network through the [`Transport`] trait so tests
//! can substitute fakes. [`HttpTransport`] is the real implementation backed
//! by `reqwest`, available with the default `http` feature.

use crate::declaration::Method;
use crate::error::Result;
use crate::form::FormData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request body built fresh for each non-GET submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RequestBody {
    /// Flattened string key/value pairs (files degraded to filenames)
    UrlEncoded(Vec<(String, String)>),
    /// The form data passed through unchanged, preserving file uploads
    Multipart(FormData),
}

/// A resolved request handed to the transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRequest {
    pub method: Method,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

/// The transport's view of a response: status, declared content type, and
/// body text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeResponse {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub body: String,
}

impl ExchangeResponse {
    /// Build a response
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    /// Success is any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetch-like boundary the engine performs exchanges through.
///
/// One call per submission: no retry, no timeout at this layer. Transport
/// errors surface with the transport's own message and are rendered in place
/// by the engine.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request and resolve its response
    async fn send(&self, request: ExchangeRequest) -> Result<ExchangeResponse>;
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use super::*;
    use crate::error::ExchangeError;
    use crate::form::FieldValue;

    /// [`Transport`] implementation over a `reqwest` client.
    ///
    /// Timeouts and connection pooling are whatever the client was built
    /// with; this layer adds none of its own.
    #[derive(Debug, Clone, Default)]
    pub struct HttpTransport {
        client: reqwest::Client,
    }

    impl HttpTransport {
        /// Create a transport with a default client
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a transport over a preconfigured client
        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }

        fn multipart_form(data: &FormData) -> Result<reqwest::multipart::Form> {
            let mut form = reqwest::multipart::Form::new();
            for (name, value) in data.iter() {
                form = match value {
                    FieldValue::Text(text) => form.text(name.to_string(), text.clone()),
                    FieldValue::File { filename, content_type, bytes } => {
                        let part = reqwest::multipart::Part::bytes(bytes.clone())
                            .file_name(filename.clone())
                            .mime_str(content_type)
                            .map_err(|e| ExchangeError::Transport(e.to_string()))?;
                        form.part(name.to_string(), part)
                    }
                };
            }
            Ok(form)
        }
    }

    #[async_trait]
    impl Transport for HttpTransport {
        async fn send(&self, request: ExchangeRequest) -> Result<ExchangeResponse> {
            let mut builder = match request.method {
                crate::declaration::Method::Get => self.client.get(&request.url),
                crate::declaration::Method::Post => self.client.post(&request.url),
            };

            match &request.body {
                None => {}
                Some(RequestBody::UrlEncoded(pairs)) => {
                    builder = builder.form(pairs);
                }
                Some(RequestBody::Multipart(data)) => {
                    builder = builder.multipart(Self::multipart_form(data)?);
                }
            }

            let response = builder
                .send()
                .await
                .map_err(|e| ExchangeError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            // Non-success bodies are never interpreted, so skip reading them
            let body = if (200..300).contains(&status) {
                response
                    .text()
                    .await
                    .map_err(|e| ExchangeError::Transport(e.to_string()))?
            } else {
                String::new()
            };

            Ok(ExchangeResponse { status, content_type, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(ExchangeResponse::new(200, None, "").is_success());
        assert!(ExchangeResponse::new(204, None, "").is_success());
        assert!(ExchangeResponse::new(299, None, "").is_success());
        assert!(!ExchangeResponse::new(199, None, "").is_success());
        assert!(!ExchangeResponse::new(301, None, "").is_success());
        assert!(!ExchangeResponse::new(500, None, "").is_success());
    }

    #[test]
    fn test_request_serialization() {
        let request = ExchangeRequest {
            method: crate::declaration::Method::Post,
            url: "/submit".to_string(),
            body: Some(RequestBody::UrlEncoded(vec![("a".to_string(), "1".to_string())])),
        };

        let json = serde_json::to_string(&request).unwrap();
        let roundtrip: ExchangeRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, roundtrip);
    }
}
