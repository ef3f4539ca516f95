pub mod dto;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use reqwest::Client;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::error::AppError;

/// One call to the training backend. Paths are relative to `BACKEND_URL`.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl BackendRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            token: None,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn json<T: Serialize>(self, body: &T) -> Result<Self, AppError> {
        let value = serde_json::to_value(body)
            .map_err(|e| AppError::Internal(format!("Failed to encode request body: {}", e)))?;
        Ok(self.body(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    pub status: StatusCode,
    pub body: Value,
}

impl BackendReply {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn detail(&self) -> Option<String> {
        error_detail(&self.body)
    }

    /// Success bodies pass through; error bodies become [`AppError::Backend`].
    /// Plain-text errors are wrapped as `{error}`; an empty or odd body collapses to a 500.
    pub fn into_result(self) -> Result<Value, AppError> {
        if self.status.is_success() {
            return Ok(self.body);
        }
        let status = self.status;
        match self.body {
            body @ Value::Object(_) => Err(AppError::Backend { status, body }),
            Value::String(text) if !text.trim().is_empty() => Err(AppError::Backend {
                status,
                body: json!({ "error": text }),
            }),
            _ => Err(AppError::Backend {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: json!({ "error": format!("Backend request failed with status {}", status) }),
            }),
        }
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn send(&self, request: BackendRequest) -> Result<BackendReply, AppError>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(&self, request: BackendRequest) -> Result<BackendReply, AppError> {
        let url = self.url(&request.path);
        debug!("backend {} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!("backend request {} {} failed: {}", request.method, url, e);
            AppError::Network(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        Ok(BackendReply::new(status, parse_body(&text)))
    }
}

/// Human readable error text: FastAPI `detail`, then `error`, then `message`.
pub fn error_detail(body: &Value) -> Option<String> {
    ["detail", "error", "message"].iter().find_map(|key| match body.get(*key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    })
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
