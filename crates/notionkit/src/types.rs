//! Core types for NotionKit
//!
//! Pages and blocks are kept as the raw JSON the API returned so the JSON
//! export can write them back verbatim. Accessors pull out the few fields
//! the exporter needs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Concatenate the `plain_text` of every rich text run, in order
///
/// Anything that is not an array yields an empty string, as do runs
/// without a `plain_text` field.
pub fn plain_text(rich_text: &Value) -> String {
    rich_text
        .as_array()
        .map(|runs| {
            runs.iter()
                .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

/// A Notion page record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page(Value);

impl Page {
    /// Wrap a raw page record
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The page id as returned by the service
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Page properties in the order the service sent them
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .get("properties")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|props| props.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// The raw record
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// A block of page content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block(Value);

impl Block {
    /// Wrap a raw block record
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Block id, if present
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// The `type` discriminator (`paragraph`, `heading_1`, ...)
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// The payload stored under the block's own type key
    pub fn content(&self) -> Option<&Value> {
        self.kind().and_then(|kind| self.0.get(kind))
    }

    /// The `rich_text` array inside the payload, if the payload is an
    /// object carrying one
    pub fn rich_text(&self) -> Option<&Value> {
        self.content()
            .and_then(Value::as_object)
            .and_then(|obj| obj.get("rich_text"))
    }

    /// The raw record
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// One batch from the block children listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockChildren {
    /// Blocks in this batch, in service order
    #[serde(default)]
    pub results: Vec<Block>,

    /// True when more batches follow
    #[serde(default)]
    pub has_more: bool,

    /// Cursor for the next batch
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Error body returned by the API on non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
