//! HTTP client for the Notion REST API

use crate::api::NotionApi;
use crate::error::ExportError;
use crate::id::NotionId;
use crate::types::{ApiErrorBody, BlockChildren, Page};
use crate::{DEFAULT_API_BASE, DEFAULT_PAGE_SIZE, DEFAULT_USER_AGENT, NOTION_VERSION};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpNotionClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Integration token sent as a bearer credential
    pub token: String,
    /// Base URL of the API (scheme and host, optionally a path prefix)
    pub api_base: String,
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Blocks requested per children batch
    pub page_size: u32,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientOptions {
    /// Options for the public API with the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// [`NotionApi`] backed by `reqwest`
pub struct HttpNotionClient {
    client: reqwest::Client,
    base: Url,
    page_size: u32,
}

impl HttpNotionClient {
    /// Build a client; fails on an empty token or unparseable base URL
    pub fn new(options: &ClientOptions) -> Result<Self, ExportError> {
        if options.token.trim().is_empty() {
            return Err(ExportError::MissingToken);
        }

        let mut base = Url::parse(&options.api_base)
            .map_err(|e| ExportError::InvalidApiBase(format!("{}: {}", options.api_base, e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ExportError::InvalidApiBase(format!(
                "{}: must start with http:// or https://",
                options.api_base
            )));
        }
        // Url::join replaces the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", options.token.trim()))
            .map_err(|_| ExportError::RequestError("token contains invalid characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert("notion-version", HeaderValue::from_static(NOTION_VERSION));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(options.timeout)
            .timeout(options.timeout)
            .build()
            .map_err(ExportError::ClientBuildError)?;

        Ok(Self {
            client,
            base,
            page_size: options.page_size.clamp(1, DEFAULT_PAGE_SIZE),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ExportError> {
        self.base
            .join(path)
            .map_err(|e| ExportError::InvalidApiBase(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ExportError> {
        let response = request.send().await.map_err(ExportError::from_reqwest)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed = serde_json::from_str::<ApiErrorBody>(&body).ok();
            let code = parsed
                .as_ref()
                .and_then(|b| b.code.clone())
                .unwrap_or_else(|| "http_error".to_string());
            let message = parsed
                .and_then(|b| b.message)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "request failed".to_string());
            return Err(ExportError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        response.json::<T>().await.map_err(ExportError::from_reqwest)
    }
}

#[async_trait]
impl NotionApi for HttpNotionClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, ExportError> {
        let url = self.endpoint(&format!("v1/pages/{}", id))?;
        debug!(%url, "Retrieving page");
        self.get_json(self.client.get(url)).await
    }

    async fn list_block_children(
        &self,
        id: &NotionId,
        cursor: Option<&str>,
    ) -> Result<BlockChildren, ExportError> {
        let url = self.endpoint(&format!("v1/blocks/{}/children", id))?;
        debug!(%url, ?cursor, page_size = self.page_size, "Listing block children");

        let mut request = self
            .client
            .get(url)
            .query(&[("page_size", self.page_size.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }
        self.get_json(request).await
    }
}
