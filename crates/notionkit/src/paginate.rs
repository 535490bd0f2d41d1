//! Cursor-following retrieval of block children

use crate::api::NotionApi;
use crate::error::ExportError;
use crate::id::NotionId;
use crate::types::Block;
use tracing::{debug, warn};

/// Fetch every direct child block of `id`, in service order
///
/// Batches are requested one after another, each with the previous batch's
/// cursor, until the service reports `has_more: false`. With
/// `max_batches: None` there is no upper bound and termination is left to
/// the service. With `Some(n)`, a listing that still has more after `n`
/// batches fails with [`ExportError::PaginationLimit`].
///
/// Errors from the API are returned as-is; no batch is retried.
pub async fn fetch_all_blocks<A>(
    api: &A,
    id: &NotionId,
    max_batches: Option<usize>,
) -> Result<Vec<Block>, ExportError>
where
    A: NotionApi + ?Sized,
{
    let mut blocks = Vec::new();
    let mut cursor: Option<String> = None;
    let mut batches = 0usize;

    loop {
        let batch = api.list_block_children(id, cursor.as_deref()).await?;
        batches += 1;
        debug!(
            backend = api.name(),
            batch = batches,
            received = batch.results.len(),
            has_more = batch.has_more,
            "Fetched block batch"
        );
        blocks.extend(batch.results);

        if !batch.has_more {
            break;
        }

        match batch.next_cursor {
            Some(next) => cursor = Some(next),
            None => {
                warn!(block = %id, "Listing reported more results without a cursor, stopping");
                break;
            }
        }

        if max_batches.is_some_and(|max| batches >= max) {
            return Err(ExportError::PaginationLimit(batches));
        }
    }

    Ok(blocks)
}
