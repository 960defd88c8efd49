use pricelens_core::Site;

use crate::adapter::{
    Field, IdField, IdRule, IdSource, ImageRules, PriceFormat, RatingFormat, RecordPolicy,
    SiteRules,
};
use crate::locator::Locator;

/// Amazon India. Every organic result carries a non-empty `data-asin`;
/// records missing any listed field are dropped.
pub const AMAZON: SiteRules = SiteRules {
    site: Site::Amazon,
    origin: "https://www.amazon.in",
    default_limit: 15,
    policy: RecordPolicy::Strict(&[
        Field::Asin,
        Field::Title,
        Field::Price,
        Field::Rating,
        Field::ImageUrl,
    ]),
    candidates: &["div[data-asin]"],
    candidate_attr: Some("data-asin"),
    sponsored: &["span.s-sponsored-label-info-icon", ".puis-sponsored-label-text"],
    id: Some(IdRule {
        source: IdSource::Anchor("data-asin"),
        field: IdField::Asin,
        url_template: Some("/dp/{id}"),
    }),
    title: &[Locator::text("h2 span"), Locator::text("h2")],
    price: &[Locator::text(".a-price .a-offscreen")],
    price_format: PriceFormat::Text,
    original_price: &[],
    discount: &[],
    rating: &[
        Locator::text("i[class*=\"a-star\"] span"),
        Locator::text("span.a-icon-alt"),
    ],
    rating_format: RatingFormat::Text,
    product_url: &[
        Locator::attr("h2 a[href]", "href"),
        Locator::attr("a.a-link-normal.s-no-outline[href]", "href"),
    ],
    image: ImageRules {
        selectors: &["img.s-image"],
        placeholder: None,
    },
};
