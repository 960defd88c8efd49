use std::time::Duration;

use pricelens_core::Site;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(
        "rate limited by {domain}{}",
        .retry_after_secs.map(|s| format!(" (retry after {s}s)")).unwrap_or_default()
    )]
    RateLimited {
        domain: String,
        /// Seconds from a numeric `Retry-After` header, if the site sent one.
        retry_after_secs: Option<u64>,
    },

    #[error("search page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid search URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid selector \"{selector}\": {reason}")]
    Selector { selector: String, reason: String },

    #[error("invalid id pattern \"{pattern}\": {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("{site} timed out after {after:?}")]
    Timeout { site: Site, after: Duration },
}
