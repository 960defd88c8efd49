pub mod adapter;
pub mod aggregate;
pub mod client;
pub mod error;
pub mod locator;
pub mod normalize;
pub mod parse;
pub(crate) mod rate_limit;
pub mod sites;

pub use adapter::{RuleAdapter, SiteAdapter};
pub use aggregate::{AggregatedResponse, Aggregator, PageFetcher, SiteOutcome};
pub use client::HttpFetcher;
pub use error::ScraperError;
pub use parse::parse_results;
pub use sites::AdapterRegistry;
