use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A supported e-commerce site.
///
/// Variant order is the canonical order used for responses and for
/// de-duplicated site selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Amazon,
    Flipkart,
    Snapdeal,
    Croma,
}

impl Site {
    pub const ALL: [Site; 4] = [Site::Amazon, Site::Flipkart, Site::Snapdeal, Site::Croma];

    /// Lowercase identifier used in query strings and JSON keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Site::Amazon => "amazon",
            Site::Flipkart => "flipkart",
            Site::Snapdeal => "snapdeal",
            Site::Croma => "croma",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Site {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amazon" => Ok(Site::Amazon),
            "flipkart" => Ok(Site::Flipkart),
            "snapdeal" => Ok(Site::Snapdeal),
            "croma" => Ok(Site::Croma),
            other => Err(CoreError::UnknownSite(other.to_owned())),
        }
    }
}

/// Parses a comma-separated site selection such as `"amazon, croma"`.
///
/// Blank entries are ignored and duplicates collapse. The result is in
/// canonical [`Site`] order. A missing or blank list selects every site.
///
/// # Errors
///
/// Returns [`CoreError::UnknownSite`] for the first unrecognized identifier.
pub fn parse_site_list(raw: Option<&str>) -> Result<Vec<Site>, CoreError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(Site::ALL.to_vec());
    };

    let mut sites = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Site::from_str)
        .collect::<Result<Vec<_>, _>>()?;
    sites.sort_unstable();
    sites.dedup();

    if sites.is_empty() {
        return Ok(Site::ALL.to_vec());
    }
    Ok(sites)
}
