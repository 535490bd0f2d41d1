//! Error types for NotionKit

use thiserror::Error;

/// Errors that can occur during an export
#[derive(Debug, Error)]
pub enum ExportError {
    /// No integration token was supplied
    #[error("Missing integration token: pass --token or set NOTION_TOKEN")]
    MissingToken,

    /// No page identifier was supplied
    #[error("Missing page id: pass --page-id or set NOTION_DEFAULT_PAGE_ID")]
    MissingPageId,

    /// Input did not contain a recognizable page identifier
    #[error("Invalid page id: {0}")]
    InvalidPageId(String),

    /// API base URL could not be parsed
    #[error("Invalid API base URL: {0}")]
    InvalidApiBase(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Service answered with a non-success status
    #[error("Notion API error (HTTP {status}, {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Listing did not finish within the configured number of batches
    #[error("Pagination stopped after {0} batches without reaching the end")]
    PaginationLimit(usize),

    /// Filesystem error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the page record
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ExportError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExportError::Timeout
        } else if err.is_connect() {
            ExportError::ConnectError(err)
        } else if err.is_decode() {
            ExportError::Decode(err.to_string())
        } else {
            ExportError::RequestError(err.to_string())
        }
    }

    /// True for errors caused by missing or malformed input, as opposed to
    /// failures talking to the service or writing output
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ExportError::MissingToken
                | ExportError::MissingPageId
                | ExportError::InvalidPageId(_)
                | ExportError::InvalidApiBase(_)
        )
    }
}
