//! Page export pipeline
//!
//! retrieve page → (Markdown only) fetch children and render → write file.
//! Nothing touches the filesystem until all remote data has been collected,
//! so a failed API call never leaves a partial file behind.

use crate::api::NotionApi;
use crate::error::ExportError;
use crate::id::NotionId;
use crate::paginate::fetch_all_blocks;
use crate::render::{extract_page_title, MarkdownRenderer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Default output directory
pub const DEFAULT_OUT_DIR: &str = "out/notion";

/// Filename used when sanitising leaves nothing
const FALLBACK_FILENAME: &str = "notion_export";

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Rendered Markdown of the page's blocks
    #[default]
    Markdown,
    /// Raw page record, pretty-printed
    Json,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            _ => Err("Invalid format: must be md or json".to_string()),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Where and how to write an export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Output directory, created if missing
    pub out_dir: PathBuf,
    /// Output format
    pub format: ExportFormat,
    /// Cap on children batches; `None` follows the cursor chain to the end
    pub max_batches: Option<usize>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            format: ExportFormat::default(),
            max_batches: None,
        }
    }
}

/// Outcome of a successful export
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Resolved page id
    pub page_id: NotionId,
    /// Extracted title (or the page id when the page has no title property)
    pub title: Option<String>,
    /// File that was written
    pub path: PathBuf,
    /// Format written
    pub format: ExportFormat,
    /// Number of child blocks fetched (always 0 for JSON)
    pub block_count: usize,
    /// Bytes written
    pub bytes: usize,
}

/// Make a title safe to use as a file stem
///
/// Trims, maps spaces to `_` and drops everything outside
/// `A-Za-z0-9._-`. Falls back to `notion_export` if nothing is left.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|&c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    if cleaned.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned
    }
}

/// Output path for a page in `out_dir`
fn output_path(
    out_dir: &Path,
    title: Option<&str>,
    id: &NotionId,
    format: ExportFormat,
) -> PathBuf {
    let stem = match title {
        Some(t) if !t.is_empty() => sanitize_filename(t),
        _ => sanitize_filename(id.as_str()),
    };
    out_dir.join(format!("{}.{}", stem, format.extension()))
}

/// Export one page through `api`
pub async fn export_page<A>(
    api: &A,
    id: &NotionId,
    renderer: &MarkdownRenderer,
    options: &ExportOptions,
) -> Result<ExportReport, ExportError>
where
    A: NotionApi + ?Sized,
{
    info!(page = %id, format = %options.format, "Fetching page");
    let page = api.retrieve_page(id).await?;
    let title = extract_page_title(&page);
    debug!(page = %id, ?title, "Retrieved page");

    let (content, block_count) = match options.format {
        ExportFormat::Json => (serde_json::to_string_pretty(&page)?, 0),
        ExportFormat::Markdown => {
            let blocks = fetch_all_blocks(api, id, options.max_batches).await?;
            let markdown = renderer.render_page(title.as_deref().unwrap_or_default(), &blocks);
            (markdown, blocks.len())
        }
    };

    let path = output_path(&options.out_dir, title.as_deref(), id, options.format);
    tokio::fs::create_dir_all(&options.out_dir).await?;
    tokio::fs::write(&path, content.as_bytes()).await?;
    info!(path = %path.display(), bytes = content.len(), "Wrote export");

    Ok(ExportReport {
        page_id: id.clone(),
        title,
        path,
        format: options.format,
        block_count,
        bytes: content.len(),
    })
}
