//! Block to Markdown rendering
//!
//! Design: a table of rules keyed by block type. Blocks whose type has no
//! rule fall back to the plain text of their `rich_text`, or render as
//! nothing. Rendering never fails.

use crate::types::{plain_text, Block, Page};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Renders one block to a line of Markdown (including its trailing newline)
pub type RenderRule = Box<dyn Fn(&Block) -> String + Send + Sync>;

/// Plain text of the `rich_text` stored under the block's own type key
fn block_text(block: &Block) -> String {
    block.rich_text().map(plain_text).unwrap_or_default()
}

fn heading(level: usize) -> RenderRule {
    let marker = "#".repeat(level);
    Box::new(move |block| format!("{} {}\n", marker, block_text(block)))
}

fn paragraph() -> RenderRule {
    Box::new(|block| format!("{}\n", block_text(block)))
}

/// Registry of per-type rendering rules
pub struct MarkdownRenderer {
    rules: HashMap<String, RenderRule>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for MarkdownRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("MarkdownRenderer")
            .field("rules", &kinds)
            .finish()
    }
}

impl MarkdownRenderer {
    /// Create a renderer with no rules; every block takes the fallback path
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Create a renderer with the built-in rules
    ///
    /// - `heading_1`, `heading_2`, `heading_3` → `#`, `##`, `###` prefix
    /// - `paragraph` → plain text
    pub fn with_defaults() -> Self {
        let mut renderer = Self::new();
        renderer.rules.insert("heading_1".to_string(), heading(1));
        renderer.rules.insert("heading_2".to_string(), heading(2));
        renderer.rules.insert("heading_3".to_string(), heading(3));
        renderer.rules.insert("paragraph".to_string(), paragraph());
        renderer
    }

    /// Register (or replace) the rule for a block type
    pub fn register<F>(&mut self, kind: impl Into<String>, rule: F)
    where
        F: Fn(&Block) -> String + Send + Sync + 'static,
    {
        self.rules.insert(kind.into(), Box::new(rule));
    }

    /// True if a dedicated rule exists for this block type
    pub fn has_rule(&self, kind: &str) -> bool {
        self.rules.contains_key(kind)
    }

    /// Render a single block
    ///
    /// Unknown types render their `rich_text` without a prefix when the
    /// payload has one; otherwise the result is empty.
    pub fn render_block(&self, block: &Block) -> String {
        let kind = block.kind().unwrap_or_default();
        if let Some(rule) = self.rules.get(kind) {
            return rule(block);
        }

        match block.rich_text() {
            Some(rich_text) => format!("{}\n", plain_text(rich_text)),
            None => String::new(),
        }
    }

    /// Render blocks in order, separated by blank lines
    ///
    /// Blocks that render to nothing are left out entirely.
    pub fn render_blocks(&self, blocks: &[Block]) -> String {
        blocks
            .iter()
            .map(|block| self.render_block(block))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render a full document: title heading followed by the blocks
    ///
    /// An empty title omits the heading.
    pub fn render_page(&self, title: &str, blocks: &[Block]) -> String {
        let body = self.render_blocks(blocks);
        if title.is_empty() {
            body
        } else {
            format!("# {}\n\n{}", title, body)
        }
    }
}

/// Page title: the first `title`-typed property, else the page id
///
/// Properties are scanned in the order the service sent them. Returns
/// `None` only when the page has neither a title property nor an id.
pub fn extract_page_title(page: &Page) -> Option<String> {
    page.properties()
        .find(|(_, prop)| prop.get("type").and_then(Value::as_str) == Some("title"))
        .map(|(_, prop)| prop.get("title").map(plain_text).unwrap_or_default())
        .or_else(|| page.id().map(str::to_string))
}
