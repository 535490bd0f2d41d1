//! NotionKit - export Notion pages to JSON or Markdown
//!
//! This crate resolves a page id (or page URL), retrieves the page through
//! the Notion API, and writes it to disk either as the raw page record or
//! as Markdown rendered from the page's child blocks.
//!
//! ## Pipeline
//!
//! - [`resolve_notion_id`] - normalize a raw id or URL to dashed form
//! - [`fetch_all_blocks`] - follow the children cursor chain to the end
//! - [`MarkdownRenderer`] - per-type block rules with a plain-text fallback
//! - [`export_page`] - tie the above together and write the output file
//!
//! [`Exporter`] wires the pipeline to [`HttpNotionClient`]. Anything that
//! implements [`NotionApi`] can stand in for the HTTP client.

pub mod api;
mod error;
mod export;
mod exporter;
mod id;
mod paginate;
mod render;
mod types;

pub use api::{ClientOptions, HttpNotionClient, NotionApi};
pub use error::ExportError;
pub use export::{
    export_page, sanitize_filename, ExportFormat, ExportOptions, ExportReport, DEFAULT_OUT_DIR,
};
pub use exporter::{Exporter, ExporterBuilder};
pub use id::{resolve_notion_id, NotionId};
pub use paginate::fetch_all_blocks;
pub use render::{extract_page_title, MarkdownRenderer, RenderRule};
pub use types::{plain_text, Block, BlockChildren, Page};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "NotionKit/0.1";

/// Public Notion API host
pub const DEFAULT_API_BASE: &str = "https://api.notion.com";

/// Value sent in the `Notion-Version` header
pub const NOTION_VERSION: &str = "2022-06-28";

/// Largest children batch the API accepts
pub const DEFAULT_PAGE_SIZE: u32 = 100;
