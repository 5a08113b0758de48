//! One network round trip, normalized.
//!
//! `Transport` is the seam every store talks through. The production
//! implementation wraps a `reqwest::Client`; tests swap in an in-memory
//! fake. No retries, no caching, no SDK-level timeout: failures surface
//! immediately to the caller.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::Session;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Text or file part of a multipart submission.
#[derive(Debug, Clone)]
pub enum FormValue {
    Text(String),
    File {
        filename: String,
        content_type: String,
        data: Vec<u8>,
    },
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub value: FormValue,
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FormValue::Text(value.into()),
        }
    }

    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            value: FormValue::File {
                filename: filename.into(),
                content_type: content_type.into(),
                data,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Multipart form-data, used where uploads ride along (user avatars,
    /// facility and repair photos).
    Multipart(Vec<FormField>),
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one round trip and returns the response body as JSON.
    ///
    /// Empty 2xx bodies normalize to `Value::Null`. Non-2xx responses
    /// become [`ClientError::Http`] carrying the status and, when the
    /// error body is JSON with a `message` (or `error`) field, the
    /// server-supplied message.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Value, ClientError>;
}

/// GET a path and decode the body into `T`.
pub async fn get_as<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
) -> Result<T, ClientError> {
    let value = transport.request(Method::Get, path, RequestBody::Empty).await?;
    Ok(serde_json::from_value(value)?)
}

/// reqwest-backed transport. The session is passed in at construction
/// and its bearer token attached to every request; there is no ambient
/// token lookup.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig, session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Value, ClientError> {
        let url = self.url(path);
        tracing::debug!("{} {}", method.as_str(), url);

        let mut request = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };

        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(fields) => {
                let mut form = reqwest::multipart::Form::new();
                for field in fields {
                    form = match field.value {
                        FormValue::Text(text) => form.text(field.name, text),
                        FormValue::File {
                            filename,
                            content_type,
                            data,
                        } => {
                            let part = reqwest::multipart::Part::bytes(data)
                                .file_name(filename)
                                .mime_str(&content_type)
                                .map_err(|e| ClientError::InvalidBody(e.to_string()))?;
                            form.part(field.name, part)
                        }
                    };
                }
                request.multipart(form)
            }
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("{} {} failed: {}", method.as_str(), url, e);
                return Err(ClientError::NetworkUnreachable(e.to_string()));
            }
        };

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkUnreachable(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .or_else(|| body.get("error"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                });
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
