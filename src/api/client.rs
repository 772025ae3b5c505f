use std::error::Error;
use std::fmt;

use reqwest::StatusCode;
use tokio::time::{timeout, Duration};

use super::models::{QueryRequest, QueryResponse};

#[derive(Clone)]
pub struct QueryClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug)]
pub enum ApiError {
    Timeout,
    Connect(reqwest::Error),
    Status { status: StatusCode, body: String },
    Decode(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Connect(err) => write!(f, "failed to reach API service: {err}"),
            Self::Status { status, body } => {
                write!(f, "API service returned {status}: {body}")
            }
            Self::Decode(err) => write!(f, "API response was not valid JSON: {err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connect(err) => Some(err),
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl QueryClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// POSTs the query verbatim, empty string included, and decodes the
    /// answer payload. The deadline covers the whole exchange.
    pub async fn ask(&self, query: &str) -> Result<QueryResponse, ApiError> {
        timeout(self.timeout, self.exchange(query))
            .await
            .map_err(|_| ApiError::Timeout)?
    }

    async fn exchange(&self, query: &str) -> Result<QueryResponse, ApiError> {
        let url = format!("{}/api/query", self.base_url.trim_end_matches('/'));
        let payload = QueryRequest {
            query: query.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(ApiError::Connect)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(ApiError::Status { status, body });
        }

        let body = response.text().await.map_err(ApiError::Connect)?;
        serde_json::from_str::<QueryResponse>(&body).map_err(ApiError::Decode)
    }
}
