//! Cross-site fan-out: fetch every selected site concurrently and collect
//! each site's records (or failure) into one response.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use pricelens_core::{ProductRecord, Site};
use serde::{Deserialize, Serialize};

use crate::error::ScraperError;
use crate::parse::parse_results;
use crate::sites::AdapterRegistry;

/// Retrieves the raw search-results markup for one site.
pub trait PageFetcher: Send + Sync {
    fn fetch(
        &self,
        site: Site,
        keyword: &str,
    ) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

/// One site's slot in an [`AggregatedResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiteOutcome {
    Products(Vec<ProductRecord>),
    Failed { error: String },
}

impl SiteOutcome {
    #[must_use]
    pub fn products(&self) -> Option<&[ProductRecord]> {
        match self {
            SiteOutcome::Products(records) => Some(records),
            SiteOutcome::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, SiteOutcome::Failed { .. })
    }
}

/// Per-request result keyed by site. Always carries all four sites;
/// unselected ones hold an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedResponse(BTreeMap<Site, SiteOutcome>);

impl AggregatedResponse {
    #[must_use]
    pub fn get(&self, site: Site) -> Option<&SiteOutcome> {
        self.0.get(&site)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Site, &SiteOutcome)> {
        self.0.iter().map(|(site, outcome)| (*site, outcome))
    }
}

/// Runs the fetch-then-parse pipeline for each selected site.
pub struct Aggregator<F> {
    fetcher: F,
    adapters: Arc<AdapterRegistry>,
    site_timeout: Duration,
}

impl<F: PageFetcher> Aggregator<F> {
    pub fn new(fetcher: F, adapters: Arc<AdapterRegistry>, site_timeout: Duration) -> Self {
        Self {
            fetcher,
            adapters,
            site_timeout,
        }
    }

    /// Searches `sites` for `keyword`.
    ///
    /// Sites run concurrently and independently: a fetch error or timeout in
    /// one site becomes that site's [`SiteOutcome::Failed`] without affecting
    /// the others. `limit` overrides each site's default result cap.
    pub async fn search(
        &self,
        keyword: &str,
        sites: &[Site],
        limit: Option<usize>,
    ) -> AggregatedResponse {
        let mut selected = sites.to_vec();
        selected.sort_unstable();
        selected.dedup();

        let outcomes = join_all(
            selected
                .iter()
                .map(|&site| async move { (site, self.search_site(site, keyword, limit).await) }),
        )
        .await;

        let mut slots: BTreeMap<Site, SiteOutcome> = Site::ALL
            .into_iter()
            .map(|site| (site, SiteOutcome::Products(Vec::new())))
            .collect();
        slots.extend(outcomes);

        AggregatedResponse(slots)
    }

    async fn search_site(&self, site: Site, keyword: &str, limit: Option<usize>) -> SiteOutcome {
        let fetched = tokio::time::timeout(self.site_timeout, self.fetcher.fetch(site, keyword))
            .await
            .unwrap_or_else(|_| {
                Err(ScraperError::Timeout {
                    site,
                    after: self.site_timeout,
                })
            });

        match fetched {
            Ok(markup) => {
                let records = parse_results(self.adapters.get(site), &markup, limit);
                tracing::info!(%site, keyword, count = records.len(), "site search complete");
                SiteOutcome::Products(records)
            }
            Err(e) => {
                tracing::warn!(%site, keyword, error = %e, "site search failed");
                SiteOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}
