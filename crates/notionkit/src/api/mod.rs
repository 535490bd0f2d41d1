//! Access to the Notion API
//!
//! Design: the exporter only needs two read operations, so they sit behind
//! the [`NotionApi`] trait. [`HttpNotionClient`] talks to the real service;
//! tests substitute in-memory implementations.

mod http;

pub use http::{ClientOptions, HttpNotionClient};

use crate::error::ExportError;
use crate::id::NotionId;
use crate::types::{BlockChildren, Page};
use async_trait::async_trait;

/// Read operations the exporter consumes
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// Unique identifier for this backend (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Retrieve a single page record
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, ExportError>;

    /// List one batch of a block's direct children
    ///
    /// `cursor` is `None` for the first batch and the previous batch's
    /// `next_cursor` afterwards.
    async fn list_block_children(
        &self,
        id: &NotionId,
        cursor: Option<&str>,
    ) -> Result<BlockChildren, ExportError>;
}
