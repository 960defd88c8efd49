//! Pure text normalizers applied to raw values pulled out of listing markup.
//!
//! Nothing here touches the document tree; callers hand in the string a
//! locator produced and get back a canonical field value or `None`.

use std::sync::LazyLock;

use pricelens_core::NO_URL;
use regex::Regex;

/// Currency markers and thousands separators stripped from price text. The
/// second alternative is the rupee sign as it appears when UTF-8 markup is
/// decoded as Windows-1252.
static PRICE_NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\u{20b9}|\u{e2}\u{201a}\u{b9}|Rs\\.|\\$|,").expect("valid price noise regex")
});

static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)").expect("valid leading number regex"));

/// Strips currency markers and thousands separators from a price string,
/// keeping the remaining numeric text as-is.
///
/// Returns `None` when nothing but whitespace is left. Applying the function
/// to its own output yields the same string.
#[must_use]
pub fn clean_price_text(raw: &str) -> Option<String> {
    let mut cleaned = raw.to_owned();
    // Removing one marker can splice together another, e.g. "R$s.".
    while PRICE_NOISE_RE.is_match(&cleaned) {
        cleaned = PRICE_NOISE_RE.replace_all(&cleaned, "").into_owned();
    }
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_owned())
    }
}

/// Parses a price string into a number after [`clean_price_text`].
#[must_use]
pub fn parse_price_amount(raw: &str) -> Option<f64> {
    clean_price_text(raw)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Converts a CSS width percentage into a 0-5 star rating.
///
/// Accepts `"80%"`, `"width:80%"`, `"width: 80%;"` and the bare `"80"` or
/// `"width:80"`; the percent sign is optional. Returns `None` for
/// missing or unparseable input rather than defaulting to zero.
#[must_use]
pub fn rating_from_width(style: &str) -> Option<f64> {
    let value = style.split(';').find_map(|decl| {
        let raw = match decl.split_once(':') {
            Some((name, value)) if name.trim().eq_ignore_ascii_case("width") => value,
            Some(_) => return None,
            None => decl,
        };
        let raw = raw.trim();
        raw.strip_suffix('%').unwrap_or(raw).trim().parse::<f64>().ok()
    })?;

    if !(0.0..=100.0).contains(&value) {
        return None;
    }
    Some(value / 20.0)
}

/// Reads a star rating from listing text such as `"4.2 out of 5 stars"` or
/// `"4.3"`. Values outside 0-5 are rejected.
#[must_use]
pub fn rating_from_text(raw: &str) -> Option<f64> {
    let caps = LEADING_NUMBER_RE.captures(raw)?;
    let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
    (0.0..=5.0).contains(&value).then_some(value)
}

/// Joins a relative path onto a site origin.
///
/// Already-absolute URLs pass through unchanged so the origin is never
/// applied twice. An empty path yields [`NO_URL`].
#[must_use]
pub fn absolutize_url(path: &str, origin: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return NO_URL.to_owned();
    }
    if path.starts_with(origin) || path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    if let Some(rest) = path.strip_prefix("//") {
        return format!("https://{rest}");
    }

    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}

/// Returns the first URL of a `srcset` list, e.g. `"a.jpg 1x, b.jpg 2x"` → `"a.jpg"`.
#[must_use]
pub fn first_srcset_url(srcset: &str) -> Option<String> {
    srcset
        .split(',')
        .next()
        .and_then(|candidate| candidate.split_whitespace().next())
        .map(str::to_owned)
}

/// Returns the first capture group of `pattern` in `url`, e.g. the numeric
/// segment after `/p/`.
#[must_use]
pub fn extract_path_id(url: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Returns `true` if an image source is a lazy-load stand-in rather than the
/// product photo: a URL ending in the site's placeholder filename, or an
/// inline `data:` URI.
#[must_use]
pub fn is_placeholder_image(src: &str, placeholder: Option<&str>) -> bool {
    let src = src.trim();
    src.starts_with("data:") || placeholder.is_some_and(|p| src.ends_with(p))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
