//! Insight HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! One exchange per question: build payload → POST → extract answer text.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use sheetlens_core::Sheet;

use crate::answer::extract_answer;

/// Most rows ever sent to the backend: the header row plus 150 data rows.
/// Independent of whatever page the viewer is showing.
pub const PAYLOAD_MAX_ROWS: usize = 151;

/// Error type for insight operations.
#[derive(Debug)]
pub enum InsightError {
    /// Query was empty after trimming — caught before any network activity
    EmptyQuery,
    /// A request is already in flight
    Busy,
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// JSON parsing error
    Parse(String),
}

impl std::fmt::Display for InsightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightError::EmptyQuery => write!(f, "query is empty"),
            InsightError::Busy => write!(f, "a request is already in flight"),
            InsightError::Network(msg) => write!(f, "Network error: {}", msg),
            InsightError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            InsightError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for InsightError {}

impl InsightError {
    /// Transport failures, bad statuses, and malformed bodies all mean the
    /// same thing to the caller: the backend could not be reached usefully.
    pub fn is_backend_unreachable(&self) -> bool {
        matches!(
            self,
            InsightError::Network(_) | InsightError::Http(_, _) | InsightError::Parse(_)
        )
    }
}

/// The wire payload. `excelData` is the sheet prefix, headers first —
/// the field name is the backend's contract, not ours to rename.
#[derive(Debug, Clone, serde::Serialize)]
pub struct QueryPayload {
    pub query: String,
    #[serde(rename = "excelData")]
    pub excel_data: Vec<Vec<String>>,
}

/// Build the outgoing payload: the trimmed query plus the first rows of
/// the sheet, capped at [`PAYLOAD_MAX_ROWS`]. Rejects an empty query
/// before anything touches the network.
pub fn build_payload(sheet: &Sheet, query: &str) -> Result<QueryPayload, InsightError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(InsightError::EmptyQuery);
    }

    let rows = sheet.rows();
    let cap = rows.len().min(PAYLOAD_MAX_ROWS);
    Ok(QueryPayload {
        query: query.to_string(),
        excel_data: rows[..cap].to_vec(),
    })
}

/// Insight API client (blocking).
pub struct InsightClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    busy: AtomicBool,
}

impl InsightClient {
    /// Create a client for the given endpoint URL with the default
    /// 30-second request timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(30))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("slens/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Submit one payload and return the extracted answer text.
    ///
    /// At most one exchange is in flight at a time: a submission while one
    /// is pending returns `Busy` without touching the network. The flag is
    /// cleared on every exit path.
    pub fn submit(&self, payload: &QueryPayload) -> Result<String, InsightError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(InsightError::Busy);
        }
        let result = self.exchange(payload);
        self.busy.store(false, Ordering::SeqCst);
        result
    }

    fn exchange(&self, payload: &QueryPayload) -> Result<String, InsightError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(InsightError::Http(status, body));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| InsightError::Parse(e.to_string()))?;

        Ok(extract_answer(&json))
    }
}
