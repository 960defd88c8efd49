//! The site-adapter capability and its table-driven implementation.
//!
//! A [`SiteRules`] table describes one site's markup conventions; a
//! [`RuleAdapter`] is the compiled form that locates candidate nodes and turns
//! each into a [`ProductRecord`]. Adding or adjusting a site means editing a
//! table in [`crate::sites`], not writing new extraction code.

use pricelens_core::{PriceValue, ProductRecord, Site, NO_IMAGE, NO_URL};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::locator::{compile_selector, compile_selectors, Locator, LocatorChain};
use crate::normalize::{
    absolutize_url, clean_price_text, extract_path_id, first_srcset_url, is_placeholder_image,
    parse_price_amount, rating_from_text, rating_from_width,
};

/// Per-site rules for locating listings and extracting records from them.
pub trait SiteAdapter: Send + Sync {
    fn site(&self) -> Site;

    /// Result cap applied when the caller does not supply one.
    fn default_limit(&self) -> usize;

    /// Returns the candidate listing nodes in document order.
    fn locate_candidates<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>>;

    /// Extracts a record from one candidate, or `None` if the node is not a
    /// genuine organic listing.
    fn extract_record(&self, candidate: ElementRef<'_>) -> Option<ProductRecord>;

    /// Applies the site's completeness policy to an extracted record.
    fn accepts(&self, record: &ProductRecord) -> bool;
}

/// A record field, used to name the fields a strict policy requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Price,
    OriginalPrice,
    Discount,
    Rating,
    ImageUrl,
    ProductUrl,
    Asin,
    ProductId,
}

impl Field {
    /// Returns `true` if `record` carries a usable value for this field.
    /// Sentinel placeholders do not count.
    #[must_use]
    pub fn is_present(self, record: &ProductRecord) -> bool {
        let text = |value: Option<&String>| value.is_some_and(|v| !v.trim().is_empty());
        match self {
            Field::Title => text(record.title.as_ref()),
            Field::Price => record.price.as_ref().is_some_and(|p| !p.is_empty()),
            Field::OriginalPrice => record.original_price.as_ref().is_some_and(|p| !p.is_empty()),
            Field::Discount => text(record.discount.as_ref()),
            Field::Rating => record.rating.is_some(),
            Field::ImageUrl => {
                text(record.image_url.as_ref()) && record.image_url.as_deref() != Some(NO_IMAGE)
            }
            Field::ProductUrl => {
                text(record.product_url.as_ref()) && record.product_url.as_deref() != Some(NO_URL)
            }
            Field::Asin => text(record.asin.as_ref()),
            Field::ProductId => text(record.product_id.as_ref()),
        }
    }
}

/// Whether incomplete records are dropped or kept.
#[derive(Debug, Clone, Copy)]
pub enum RecordPolicy {
    /// Drop any record missing one of the listed fields.
    Strict(&'static [Field]),
    /// Keep every extracted record; missing image/URL carry sentinels.
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceFormat {
    /// Keep the cleaned text.
    Text,
    /// Parse the cleaned text into a number.
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingFormat {
    /// A CSS width percentage, divided by 20.
    WidthPercent,
    /// Text beginning with the star value.
    Text,
}

/// Where a site-native identifier comes from.
#[derive(Debug, Clone, Copy)]
pub enum IdSource {
    /// A mandatory attribute on the candidate node. A candidate without it
    /// is not a listing.
    Anchor(&'static str),
    /// An optional attribute on the candidate node.
    NodeAttr(&'static str),
    /// The first capture group of a pattern applied to the product URL.
    UrlPattern(&'static str),
}

/// Which record field the identifier is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdField {
    Asin,
    ProductId,
}

#[derive(Debug, Clone, Copy)]
pub struct IdRule {
    pub source: IdSource,
    pub field: IdField,
    /// Path used for the product URL when no link is found, with `{id}`
    /// replaced by the identifier.
    pub url_template: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
pub struct ImageRules {
    /// Selectors for the primary listing image, tried in order.
    pub selectors: &'static [&'static str],
    /// Filename suffix the site uses for lazy-load placeholders.
    pub placeholder: Option<&'static str>,
}

/// Declarative description of one site's search-results markup.
#[derive(Debug, Clone, Copy)]
pub struct SiteRules {
    pub site: Site,
    /// Scheme + host used to absolutize relative links.
    pub origin: &'static str,
    pub default_limit: usize,
    pub policy: RecordPolicy,
    /// Candidate container selectors. The first one that matches anything
    /// on the page is used exclusively.
    pub candidates: &'static [&'static str],
    /// Attribute every candidate must carry with a non-empty value.
    pub candidate_attr: Option<&'static str>,
    /// Any match inside a candidate marks it as a paid placement.
    pub sponsored: &'static [&'static str],
    pub id: Option<IdRule>,
    pub title: &'static [Locator],
    pub price: &'static [Locator],
    pub price_format: PriceFormat,
    pub original_price: &'static [Locator],
    pub discount: &'static [Locator],
    pub rating: &'static [Locator],
    pub rating_format: RatingFormat,
    pub product_url: &'static [Locator],
    pub image: ImageRules,
}

#[derive(Debug)]
enum CompiledIdSource {
    Attr(&'static str),
    UrlPattern(Regex),
}

/// A [`SiteAdapter`] compiled from a [`SiteRules`] table.
#[derive(Debug)]
pub struct RuleAdapter {
    rules: SiteRules,
    candidates: Vec<Selector>,
    sponsored: Vec<Selector>,
    id_source: Option<CompiledIdSource>,
    title: LocatorChain,
    price: LocatorChain,
    original_price: LocatorChain,
    discount: LocatorChain,
    rating: LocatorChain,
    product_url: LocatorChain,
    image: Vec<Selector>,
    any_image: Selector,
}

impl RuleAdapter {
    /// Compiles every selector and pattern in `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Selector`] or [`ScraperError::Pattern`] if the
    /// table contains an invalid selector or id pattern.
    pub fn new(rules: &SiteRules) -> Result<Self, ScraperError> {
        let id_source = rules
            .id
            .map(|id| match id.source {
                IdSource::Anchor(name) | IdSource::NodeAttr(name) => {
                    Ok(CompiledIdSource::Attr(name))
                }
                IdSource::UrlPattern(pattern) => Regex::new(pattern)
                    .map(CompiledIdSource::UrlPattern)
                    .map_err(|e| ScraperError::Pattern {
                        pattern: pattern.to_owned(),
                        reason: e.to_string(),
                    }),
            })
            .transpose()?;

        Ok(Self {
            candidates: compile_selectors(rules.candidates)?,
            sponsored: compile_selectors(rules.sponsored)?,
            id_source,
            title: LocatorChain::compile(rules.title)?,
            price: LocatorChain::compile(rules.price)?,
            original_price: LocatorChain::compile(rules.original_price)?,
            discount: LocatorChain::compile(rules.discount)?,
            rating: LocatorChain::compile(rules.rating)?,
            product_url: LocatorChain::compile(rules.product_url)?,
            image: compile_selectors(rules.image.selectors)?,
            any_image: compile_selector("img")?,
            rules: *rules,
        })
    }

    fn is_candidate(&self, node: ElementRef<'_>) -> bool {
        self.rules.candidate_attr.is_none_or(|name| {
            node.value()
                .attr(name)
                .is_some_and(|v| !v.trim().is_empty())
        })
    }

    fn is_sponsored(&self, node: ElementRef<'_>) -> bool {
        self.sponsored
            .iter()
            .any(|selector| node.select(selector).next().is_some())
    }

    fn extract_price(&self, chain: &LocatorChain, node: ElementRef<'_>) -> Option<PriceValue> {
        let raw = chain.first_match(node)?;
        match self.rules.price_format {
            PriceFormat::Text => clean_price_text(&raw).map(PriceValue::Text),
            PriceFormat::Amount => parse_price_amount(&raw).map(PriceValue::Amount),
        }
    }

    fn extract_rating(&self, node: ElementRef<'_>) -> Option<f64> {
        let raw = self.rating.first_match(node)?;
        match self.rules.rating_format {
            RatingFormat::WidthPercent => rating_from_width(&raw),
            RatingFormat::Text => rating_from_text(&raw),
        }
    }

    /// Image fallback order: `src`, `data-src`, the first `srcset` entry,
    /// then any `img[src]` in the node. Placeholders count as missing.
    fn extract_image(&self, node: ElementRef<'_>) -> String {
        let placeholder = self.rules.image.placeholder;
        let usable = |value: Option<String>| {
            value.filter(|v| !v.trim().is_empty() && !is_placeholder_image(v, placeholder))
        };
        let attr = |img: ElementRef<'_>, name: &str| img.value().attr(name).map(str::to_owned);

        let primary = self
            .image
            .iter()
            .find_map(|selector| node.select(selector).next());

        let from_primary = primary.and_then(|img| {
            usable(attr(img, "src"))
                .or_else(|| usable(attr(img, "data-src")))
                .or_else(|| usable(img.value().attr("srcset").and_then(first_srcset_url)))
        });

        from_primary
            .or_else(|| {
                node.select(&self.any_image)
                    .find_map(|img| usable(attr(img, "src")))
            })
            .map_or_else(
                || NO_IMAGE.to_owned(),
                |src| absolutize_url(&src, self.rules.origin),
            )
    }

    fn extract_id(&self, node: ElementRef<'_>, link: Option<&str>) -> Option<String> {
        match self.id_source.as_ref()? {
            CompiledIdSource::Attr(name) => node
                .value()
                .attr(name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned),
            CompiledIdSource::UrlPattern(pattern) => extract_path_id(link?, pattern),
        }
    }
}

impl SiteAdapter for RuleAdapter {
    fn site(&self) -> Site {
        self.rules.site
    }

    fn default_limit(&self) -> usize {
        self.rules.default_limit
    }

    fn locate_candidates<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        self.candidates
            .iter()
            .map(|selector| {
                document
                    .select(selector)
                    .filter(|node| self.is_candidate(*node))
                    .collect::<Vec<_>>()
            })
            .find(|nodes| !nodes.is_empty())
            .unwrap_or_default()
    }

    fn extract_record(&self, candidate: ElementRef<'_>) -> Option<ProductRecord> {
        if self.is_sponsored(candidate) {
            tracing::trace!(site = %self.rules.site, "skipping sponsored listing");
            return None;
        }

        let link = self.product_url.first_match(candidate);
        let id = self.extract_id(candidate, link.as_deref());

        let id_rule = self.rules.id;
        let anchored = id_rule.is_some_and(|rule| matches!(rule.source, IdSource::Anchor(_)));
        if anchored && id.is_none() {
            tracing::trace!(site = %self.rules.site, "skipping candidate without anchor id");
            return None;
        }

        let product_url = match (&link, id_rule.and_then(|r| r.url_template), &id) {
            (Some(href), _, _) => absolutize_url(href, self.rules.origin),
            (None, Some(template), Some(id)) => {
                absolutize_url(&template.replace("{id}", id), self.rules.origin)
            }
            _ => NO_URL.to_owned(),
        };

        let mut record = ProductRecord {
            title: self.title.first_match(candidate),
            price: self.extract_price(&self.price, candidate),
            original_price: self.extract_price(&self.original_price, candidate),
            discount: self.discount.first_match(candidate),
            rating: self.extract_rating(candidate),
            image_url: Some(self.extract_image(candidate)),
            product_url: Some(product_url),
            asin: None,
            product_id: None,
        };

        match id_rule.map(|r| r.field) {
            Some(IdField::Asin) => record.asin = id,
            Some(IdField::ProductId) => record.product_id = id,
            None => {}
        }

        Some(record)
    }

    fn accepts(&self, record: &ProductRecord) -> bool {
        match self.rules.policy {
            RecordPolicy::Strict(required) => required.iter().all(|f| f.is_present(record)),
            RecordPolicy::Lenient => true,
        }
    }
}
