//! Offset pagination over the options listing.

use eodhd_core::{EodhdError, Flattening, MAX_OFFSET, OptionsQuery, PAGE_SIZE, RecordSet};
use serde_json::Value;

/// Progress snapshot reported after each accepted page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchProgress {
    /// 1-based page counter.
    pub page: usize,
    /// `page[offset]` the page was requested with.
    pub offset: u32,
    /// Records flattened from this page.
    pub batch_len: usize,
    /// Records accumulated so far, after any limit truncation.
    pub fetched: usize,
}

/// Drive `fetch_page` from offset 0 until the listing is exhausted.
///
/// Stops on the first of: a payload without a `data` array, an empty batch,
/// the query limit being reached (the result is truncated to exactly the
/// limit), a short page, or the offset passing [`MAX_OFFSET`]. Transport
/// errors from `fetch_page` abort the whole fetch.
pub(crate) fn paginate<G, F>(
    query: &OptionsQuery,
    mut fetch_page: G,
    mut on_page: F,
) -> Result<RecordSet, EodhdError>
where
    G: FnMut(u32) -> Result<Value, EodhdError>,
    F: FnMut(FetchProgress),
{
    let page_size = PAGE_SIZE as usize;
    let mut out = RecordSet::new();
    let mut offset = 0u32;
    let mut page = 0usize;

    while offset <= MAX_OFFSET {
        let payload = fetch_page(offset)?;
        let Some(batch) = Flattening::Attributes.apply(payload) else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "eodhd_options::paginate",
                offset,
                "response has no data array; stopping"
            );
            break;
        };
        if batch.is_empty() {
            break;
        }

        let batch_len = batch.len();
        out.extend(batch);
        page += 1;

        let limit_hit = query.limit().is_some_and(|limit| out.len() >= limit);
        if let Some(limit) = query.limit() {
            out.truncate(limit);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "eodhd_options::paginate",
            page,
            offset,
            batch_len,
            fetched = out.len(),
            "page fetched"
        );
        on_page(FetchProgress {
            page,
            offset,
            batch_len,
            fetched: out.len(),
        });

        if limit_hit || batch_len < page_size {
            break;
        }
        offset += PAGE_SIZE;
    }

    Ok(out)
}
