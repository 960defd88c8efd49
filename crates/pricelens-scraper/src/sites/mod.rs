//! Rule tables for the supported sites and the registry that compiles them.

mod amazon;
mod croma;
mod flipkart;
mod snapdeal;

use pricelens_core::Site;

use crate::adapter::{RuleAdapter, SiteRules};
use crate::error::ScraperError;

pub use amazon::AMAZON;
pub use croma::CROMA;
pub use flipkart::FLIPKART;
pub use snapdeal::SNAPDEAL;

/// Returns the static rule table for `site`.
#[must_use]
pub fn rules_for(site: Site) -> &'static SiteRules {
    match site {
        Site::Amazon => &AMAZON,
        Site::Flipkart => &FLIPKART,
        Site::Snapdeal => &SNAPDEAL,
        Site::Croma => &CROMA,
    }
}

/// One compiled adapter per supported site.
///
/// Built once at startup and shared read-only across requests.
#[derive(Debug)]
pub struct AdapterRegistry {
    amazon: RuleAdapter,
    flipkart: RuleAdapter,
    snapdeal: RuleAdapter,
    croma: RuleAdapter,
}

impl AdapterRegistry {
    /// Compiles every site's rule table.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Selector`] or [`ScraperError::Pattern`] if a
    /// table contains an invalid selector or pattern.
    pub fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            amazon: RuleAdapter::new(&AMAZON)?,
            flipkart: RuleAdapter::new(&FLIPKART)?,
            snapdeal: RuleAdapter::new(&SNAPDEAL)?,
            croma: RuleAdapter::new(&CROMA)?,
        })
    }

    #[must_use]
    pub fn get(&self, site: Site) -> &RuleAdapter {
        match site {
            Site::Amazon => &self.amazon,
            Site::Flipkart => &self.flipkart,
            Site::Snapdeal => &self.snapdeal,
            Site::Croma => &self.croma,
        }
    }
}
