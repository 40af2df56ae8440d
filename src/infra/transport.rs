use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failures below the GraphQL layer. Any of these aborts the current phase.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TransportError::Status { status: 401, .. })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Value,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GraphQlError {
    pub message: String,
    #[allow(dead_code)] // Part of AniList's error schema
    #[serde(default)]
    pub status: Option<i32>,
}

impl GraphQlResponse {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

/// Sends one GraphQL document and hands back the decoded envelope.
pub trait Transport {
    fn execute(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError>;
}

/// Blocking HTTP transport authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl HttpTransport {
    pub fn new(
        endpoint: String,
        token: String,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(format!("anilist-sync/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
            token,
        })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        let body = serde_json::to_string(request)?;
        debug!(endpoint = %self.endpoint, variables = %request.variables, "posting GraphQL request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        debug!(%status, bytes = text.len(), "GraphQL response received");

        // AniList answers an unmatched search with 404 and a regular error envelope.
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}
