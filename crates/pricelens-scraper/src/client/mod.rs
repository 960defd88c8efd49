//! HTTP retrieval of search-results pages.

mod search_url;

use std::collections::HashMap;
use std::time::Duration;

use pricelens_core::{AppConfig, Site};
use reqwest::Client;

use crate::aggregate::PageFetcher;
use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::sites::rules_for;

pub use search_url::search_url;

/// Fetches raw search-results markup over HTTP.
///
/// Sends a fixed `User-Agent` and maps 429, 404 and other non-2xx
/// responses to typed errors. Network errors, 429 and 5xx are retried with
/// exponential backoff up to `max_retries` extra attempts; a 429 waits at
/// least as long as its `Retry-After` header asks.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
    origins: HashMap<Site, String>,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
            origins: HashMap::new(),
        })
    }

    /// Builds a fetcher from the request timeout, user agent and retry
    /// settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Sends `site`'s searches to `origin` instead of the live site.
    #[must_use]
    pub fn with_origin(mut self, site: Site, origin: impl Into<String>) -> Self {
        self.origins.insert(site, origin.into());
        self
    }

    fn origin(&self, site: Site) -> &str {
        self.origins
            .get(&site)
            .map_or(rules_for(site).origin, String::as_str)
    }

    /// Fetches the first search-results page for `keyword` on `site`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if the configured origin is not a URL.
    /// - [`ScraperError::RateLimited`] on HTTP 429 once retries are exhausted.
    /// - [`ScraperError::NotFound`] on HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure.
    pub async fn fetch_page(&self, site: Site, keyword: &str) -> Result<String, ScraperError> {
        let url = search_url(self.origin(site), site, keyword)?;
        tracing::debug!(%site, %url, "fetching search page");

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-IN,en;q=0.9")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok());
                    return Err(ScraperError::RateLimited {
                        domain: search_url::host_of(&url),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, site: Site, keyword: &str) -> Result<String, ScraperError> {
        self.fetch_page(site, keyword).await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
