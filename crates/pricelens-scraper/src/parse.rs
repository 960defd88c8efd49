//! Result-set parsing: one page of markup in, an ordered record list out.

use pricelens_core::ProductRecord;
use scraper::Html;

use crate::adapter::SiteAdapter;

/// Extracts up to `limit` records from one search-results page.
///
/// Candidates are visited in document order and the walk stops as soon as
/// `limit` records have been accepted. `None` uses the adapter's default
/// limit. A page with no candidates yields an empty list. Records are never
/// reordered.
#[must_use]
pub fn parse_results<A>(adapter: &A, markup: &str, limit: Option<usize>) -> Vec<ProductRecord>
where
    A: SiteAdapter + ?Sized,
{
    let limit = limit.unwrap_or_else(|| adapter.default_limit());
    let document = Html::parse_document(markup);
    let candidates = adapter.locate_candidates(&document);

    let mut records = Vec::with_capacity(limit.min(candidates.len()));
    let mut skipped = 0usize;
    let mut rejected = 0usize;

    for candidate in &candidates {
        if records.len() >= limit {
            break;
        }
        match adapter.extract_record(*candidate) {
            Some(record) if adapter.accepts(&record) => records.push(record),
            Some(_) => rejected += 1,
            None => skipped += 1,
        }
    }

    tracing::debug!(
        site = %adapter.site(),
        candidates = candidates.len(),
        kept = records.len(),
        skipped,
        rejected,
        limit,
        "parsed search results page"
    );

    records
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
