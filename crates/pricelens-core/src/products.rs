use serde::{Deserialize, Serialize};

/// Placeholder stored in [`ProductRecord::image_url`] when no image survives
/// the fallback chain.
pub const NO_IMAGE: &str = "No Image";

/// Placeholder stored in [`ProductRecord::product_url`] when the listing has
/// no usable link.
pub const NO_URL: &str = "No URL";

/// A normalized price. Some sites keep the cleaned text verbatim, others
/// parse it into a number; both serialize as a bare JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    /// Currency glyph and thousands separators stripped, e.g. `"1299.00"`.
    Text(String),
    /// Parsed amount, e.g. `1299.0`.
    Amount(f64),
}

impl PriceValue {
    /// Returns `true` when the value carries no usable price.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            PriceValue::Text(text) => text.trim().is_empty(),
            PriceValue::Amount(amount) => !amount.is_finite(),
        }
    }
}

/// One product listing extracted from a site's search-results page.
///
/// Every field is optional because live markup varies between page
/// templates. Site-specific fields are omitted from JSON when absent so each
/// site's payload only carries what that site exposes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: Option<String>,
    pub price: Option<PriceValue>,
    /// Pre-discount price, for sites that show markdowns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<PriceValue>,
    /// Discount label as displayed, e.g. `"23% off"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    /// Star rating on a 0-5 scale. Absent when the listing shows none.
    pub rating: Option<f64>,
    /// Image URL, or [`NO_IMAGE`].
    pub image_url: Option<String>,
    /// Absolute product URL, or [`NO_URL`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    /// Amazon Standard Identification Number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    /// Site-native numeric product identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}
