use pricelens_core::Site;

use crate::adapter::{
    Field, IdField, IdRule, IdSource, ImageRules, PriceFormat, RatingFormat, RecordPolicy,
    SiteRules,
};
use crate::locator::Locator;

/// Croma. Listings without a discount badge or image are dropped; the
/// numeric product id is taken from the `/p/<digits>` product path.
pub const CROMA: SiteRules = SiteRules {
    site: Site::Croma,
    origin: "https://www.croma.com",
    default_limit: 10,
    policy: RecordPolicy::Strict(&[
        Field::Title,
        Field::Price,
        Field::Discount,
        Field::ImageUrl,
        Field::ProductUrl,
    ]),
    candidates: &["li.product-item"],
    candidate_attr: None,
    sponsored: &[],
    id: Some(IdRule {
        source: IdSource::UrlPattern(r"/p/(\d+)"),
        field: IdField::ProductId,
        url_template: None,
    }),
    title: &[Locator::text("h3.product-title")],
    price: &[Locator::text("span.amount")],
    price_format: PriceFormat::Amount,
    original_price: &[Locator::text("span.strike-through")],
    discount: &[Locator::text("span.discount")],
    rating: &[],
    rating_format: RatingFormat::Text,
    product_url: &[Locator::attr("h3.product-title a", "href")],
    image: ImageRules {
        selectors: &["div img"],
        placeholder: Some("placeholder.png"),
    },
};
