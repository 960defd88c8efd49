use pricelens_core::Site;

use crate::adapter::{ImageRules, PriceFormat, RatingFormat, RecordPolicy, SiteRules};
use crate::locator::Locator;

/// Flipkart. Class names are obfuscated and rotate per category template,
/// so each field lists the known variants newest first.
pub const FLIPKART: SiteRules = SiteRules {
    site: Site::Flipkart,
    origin: "https://www.flipkart.com",
    default_limit: 10,
    policy: RecordPolicy::Lenient,
    candidates: &["div.slAVV4", "div.tUxRFH", "div._13oc-S"],
    candidate_attr: None,
    sponsored: &[],
    id: None,
    title: &[
        Locator::text("a.wjcEIp"),
        Locator::text("div.wjcEIp"),
        Locator::text("a.KzDlHZ"),
        Locator::text("div.KzDlHZ"),
        Locator::text("a.IRpwTa"),
        Locator::text("div.IRpwTa"),
    ],
    price: &[
        Locator::text("div.Nx9bqj"),
        Locator::text("div._30jeq3"),
        Locator::text("div._1_WHN1"),
    ],
    price_format: PriceFormat::Text,
    original_price: &[Locator::text("div.yRaY8j"), Locator::text("div._3I9_wc")],
    discount: &[Locator::text("div.UkUFwK"), Locator::text("div._3Ay6Sb")],
    rating: &[Locator::text("div.XQDdHH"), Locator::text("div._3LWZlK")],
    rating_format: RatingFormat::Text,
    product_url: &[
        Locator::attr("a.wjcEIp", "href"),
        Locator::attr("a.KzDlHZ", "href"),
        Locator::attr("a.IRpwTa", "href"),
        Locator::attr("a.CGtC98", "href"),
    ],
    image: ImageRules {
        selectors: &["img.DByuf4", "img._396cs4", "img._2r_T1I"],
        placeholder: None,
    },
};
