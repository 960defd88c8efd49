//! Search-page URL construction per site.

use pricelens_core::Site;
use reqwest::Url;

use crate::error::ScraperError;

/// Builds the search-results URL for `keyword` on `site`, rooted at `origin`.
///
/// Runs of whitespace in the keyword collapse to one space before encoding,
/// so `"iphone   15"` and `"iphone 15"` produce the same URL.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `origin` is not a valid URL base.
pub fn search_url(origin: &str, site: Site, keyword: &str) -> Result<Url, ScraperError> {
    let keyword = keyword.split_whitespace().collect::<Vec<_>>().join(" ");
    let (path, pairs): (&str, Vec<(&str, String)>) = match site {
        Site::Amazon => ("/s", vec![("k", keyword), ("page", "1".to_owned())]),
        Site::Flipkart => ("/search", vec![("q", keyword)]),
        Site::Snapdeal => (
            "/search",
            vec![("keyword", keyword), ("sort", "rlvncy".to_owned())],
        ),
        Site::Croma => (
            "/searchB",
            vec![("q", format!("{keyword}:relevance")), ("text", keyword)],
        ),
    };

    let base = format!("{}{path}", origin.trim_end_matches('/'));
    let mut url = Url::parse(&base).map_err(|e| ScraperError::InvalidUrl {
        url: base.clone(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut()
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
    Ok(url)
}

/// Host name of `url` for error messages, falling back to the full URL.
pub(super) fn host_of(url: &Url) -> String {
    url.host_str()
        .map_or_else(|| url.to_string(), str::to_owned)
}
