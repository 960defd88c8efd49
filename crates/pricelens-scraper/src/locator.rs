//! Ordered fallback chains of CSS locators.
//!
//! Site markup differs between page templates and roll-outs, so every field
//! is described by a short list of locators tried in order. The first one
//! that yields a non-empty value wins; if none does, the field is absent.

use scraper::{ElementRef, Selector};

use crate::error::ScraperError;

/// What to read from a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Whitespace-collapsed text content.
    Text,
    /// The named attribute.
    Attr(&'static str),
}

/// A declarative (selector, probe) pair as written in a site's rule table.
#[derive(Debug, Clone, Copy)]
pub struct Locator {
    pub css: &'static str,
    pub probe: Probe,
}

impl Locator {
    #[must_use]
    pub const fn text(css: &'static str) -> Self {
        Self {
            css,
            probe: Probe::Text,
        }
    }

    #[must_use]
    pub const fn attr(css: &'static str, name: &'static str) -> Self {
        Self {
            css,
            probe: Probe::Attr(name),
        }
    }
}

/// Compiles one CSS selector, mapping parse failures to [`ScraperError::Selector`].
///
/// # Errors
///
/// Returns [`ScraperError::Selector`] if `css` is not a valid selector.
pub fn compile_selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::Selector {
        selector: css.to_owned(),
        reason: e.to_string(),
    })
}

/// Compiles a list of selectors, failing on the first invalid one.
///
/// # Errors
///
/// Returns [`ScraperError::Selector`] for the first invalid selector.
pub fn compile_selectors(css: &[&str]) -> Result<Vec<Selector>, ScraperError> {
    css.iter().map(|s| compile_selector(s)).collect()
}

#[derive(Debug)]
struct CompiledLocator {
    selector: Selector,
    probe: Probe,
}

/// A compiled, ordered locator chain for one field.
#[derive(Debug, Default)]
pub struct LocatorChain {
    locators: Vec<CompiledLocator>,
}

impl LocatorChain {
    /// Compiles every locator up front so a typo in a rule table surfaces at
    /// adapter construction, not while walking a page.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Selector`] for the first invalid selector.
    pub fn compile(locators: &[Locator]) -> Result<Self, ScraperError> {
        let locators = locators
            .iter()
            .map(|locator| {
                Ok(CompiledLocator {
                    selector: compile_selector(locator.css)?,
                    probe: locator.probe,
                })
            })
            .collect::<Result<Vec<_>, ScraperError>>()?;
        Ok(Self { locators })
    }

    /// Returns the first non-empty value produced by the chain inside `node`.
    ///
    /// Each locator looks only at its first matching element, mirroring how a
    /// reader scans the card top to bottom.
    #[must_use]
    pub fn first_match(&self, node: ElementRef<'_>) -> Option<String> {
        self.locators.iter().find_map(|locator| {
            let element = node.select(&locator.selector).next()?;
            probe(element, locator.probe)
        })
    }
}

/// Reads a probe from one element, returning `None` for missing or blank values.
#[must_use]
pub fn probe(element: ElementRef<'_>, probe: Probe) -> Option<String> {
    let value = match probe {
        Probe::Text => collapse_whitespace(&element.text().collect::<String>()),
        Probe::Attr(name) => element.value().attr(name)?.trim().to_owned(),
    };
    (!value.is_empty()).then_some(value)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    fn first_div(document: &Html) -> ElementRef<'_> {
        let sel = compile_selector("div.card").unwrap();
        document.select(&sel).next().unwrap()
    }

    #[test]
    fn first_locator_wins_when_present() {
        let doc = Html::parse_fragment(
            r#"<div class="card"><span class="a">First</span><span class="b">Second</span></div>"#,
        );
        let chain =
            LocatorChain::compile(&[Locator::text("span.a"), Locator::text("span.b")]).unwrap();
        assert_eq!(chain.first_match(first_div(&doc)).as_deref(), Some("First"));
    }

    #[test]
    fn falls_through_to_later_locator() {
        let doc = Html::parse_fragment(r#"<div class="card"><span class="b">Second</span></div>"#);
        let chain =
            LocatorChain::compile(&[Locator::text("span.a"), Locator::text("span.b")]).unwrap();
        assert_eq!(chain.first_match(first_div(&doc)).as_deref(), Some("Second"));
    }

    #[test]
    fn blank_match_falls_through() {
        let doc = Html::parse_fragment(
            r#"<div class="card"><span class="a">   </span><span class="b">Second</span></div>"#,
        );
        let chain =
            LocatorChain::compile(&[Locator::text("span.a"), Locator::text("span.b")]).unwrap();
        assert_eq!(chain.first_match(first_div(&doc)).as_deref(), Some("Second"));
    }

    #[test]
    fn attribute_probe_reads_attribute() {
        let doc = Html::parse_fragment(r#"<div class="card"><a class="t" href="/p/1">X</a></div>"#);
        let chain = LocatorChain::compile(&[Locator::attr("a.t", "href")]).unwrap();
        assert_eq!(chain.first_match(first_div(&doc)).as_deref(), Some("/p/1"));
    }

    #[test]
    fn all_locators_missing_is_none() {
        let doc = Html::parse_fragment(r#"<div class="card"><p>nothing</p></div>"#);
        let chain = LocatorChain::compile(&[Locator::text("span.a")]).unwrap();
        assert!(chain.first_match(first_div(&doc)).is_none());
    }

    #[test]
    fn text_is_whitespace_collapsed() {
        let doc = Html::parse_fragment(
            "<div class=\"card\"><h2>  Apple\n   iPhone <b>15</b> </h2></div>",
        );
        let chain = LocatorChain::compile(&[Locator::text("h2")]).unwrap();
        assert_eq!(
            chain.first_match(first_div(&doc)).as_deref(),
            Some("Apple iPhone 15")
        );
    }

    #[test]
    fn invalid_selector_is_rejected_at_compile_time() {
        let err = LocatorChain::compile(&[Locator::text("div[")]).unwrap_err();
        assert!(matches!(err, ScraperError::Selector { ref selector, .. } if selector == "div["));
    }
}
