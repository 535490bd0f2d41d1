//! Exporter builder

use crate::api::{ClientOptions, HttpNotionClient};
use crate::error::ExportError;
use crate::export::{export_page, ExportFormat, ExportOptions, ExportReport};
use crate::id::resolve_notion_id;
use crate::render::MarkdownRenderer;
use crate::{DEFAULT_API_BASE, DEFAULT_PAGE_SIZE};
use std::path::PathBuf;
use std::time::Duration;

/// Builder for configuring an [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct ExporterBuilder {
    token: Option<String>,
    api_base: Option<String>,
    user_agent: Option<String>,
    page_size: Option<u32>,
    timeout: Option<Duration>,
    out_dir: Option<PathBuf>,
    format: ExportFormat,
    max_batches: Option<usize>,
}

impl ExporterBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the integration token (required)
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Point at a different API host
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Blocks per children batch (1-100)
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Output directory
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    /// Output format
    pub fn format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Stop with an error after this many children batches
    pub fn max_batches(mut self, max: usize) -> Self {
        self.max_batches = Some(max);
        self
    }

    /// Build the exporter
    ///
    /// Fails with [`ExportError::MissingToken`] when no token was given, or
    /// when the API base or token cannot be used to build a client.
    pub fn build(self) -> Result<Exporter, ExportError> {
        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ExportError::MissingToken)?;

        let mut client_options = ClientOptions::new(token);
        client_options.api_base = self
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        client_options.user_agent = self.user_agent;
        client_options.page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if let Some(timeout) = self.timeout {
            client_options.timeout = timeout;
        }

        let client = HttpNotionClient::new(&client_options)?;
        let mut options = ExportOptions {
            format: self.format,
            max_batches: self.max_batches,
            ..Default::default()
        };
        if let Some(dir) = self.out_dir {
            options.out_dir = dir;
        }

        Ok(Exporter {
            client,
            renderer: MarkdownRenderer::with_defaults(),
            options,
        })
    }
}

/// Configured exporter over the HTTP API
pub struct Exporter {
    client: HttpNotionClient,
    renderer: MarkdownRenderer,
    options: ExportOptions,
}

impl Exporter {
    /// Create a new exporter builder
    pub fn builder() -> ExporterBuilder {
        ExporterBuilder::new()
    }

    /// Export options in effect
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Mutable access to the renderer, for registering extra block rules
    pub fn renderer_mut(&mut self) -> &mut MarkdownRenderer {
        &mut self.renderer
    }

    /// Export a page given a raw id or page URL
    pub async fn export(&self, page: &str) -> Result<ExportReport, ExportError> {
        if page.trim().is_empty() {
            return Err(ExportError::MissingPageId);
        }
        let id = resolve_notion_id(Some(page.trim()))
            .ok_or_else(|| ExportError::InvalidPageId(page.to_string()))?;
        export_page(&self.client, &id, &self.renderer, &self.options).await
    }
}
