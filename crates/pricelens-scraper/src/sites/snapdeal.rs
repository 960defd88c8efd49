use pricelens_core::Site;

use crate::adapter::{
    IdField, IdRule, IdSource, ImageRules, PriceFormat, RatingFormat, RecordPolicy, SiteRules,
};
use crate::locator::Locator;

/// Snapdeal. Ratings are drawn as a filled-star bar whose CSS width is the
/// score as a percentage.
pub const SNAPDEAL: SiteRules = SiteRules {
    site: Site::Snapdeal,
    origin: "https://www.snapdeal.com",
    default_limit: 15,
    policy: RecordPolicy::Lenient,
    candidates: &["div.product-tuple-listing"],
    candidate_attr: None,
    sponsored: &[],
    id: Some(IdRule {
        source: IdSource::NodeAttr("id"),
        field: IdField::ProductId,
        url_template: None,
    }),
    title: &[Locator::text("p.product-title")],
    price: &[Locator::text("span.product-price")],
    price_format: PriceFormat::Amount,
    original_price: &[],
    discount: &[],
    rating: &[Locator::attr("div.filled-stars", "style")],
    rating_format: RatingFormat::WidthPercent,
    product_url: &[Locator::attr("a.dp-widget-link", "href")],
    image: ImageRules {
        selectors: &["img.product-image"],
        placeholder: Some("default-product-image.jpg"),
    },
};

#[cfg(test)]
mod tests {
    use pricelens_core::{PriceValue, ProductRecord, NO_IMAGE, NO_URL};

    use super::*;
    use crate::adapter::RuleAdapter;
    use crate::parse::parse_results;

    fn parse(html: &str) -> Vec<ProductRecord> {
        let adapter = RuleAdapter::new(&SNAPDEAL).unwrap();
        parse_results(&adapter, html, None)
    }

    #[test]
    fn extracts_tuple_listing() {
        let html = r#"<html><body><section class="js-section">
            <div class="product-tuple-listing js-tuple" id="638887459127">
              <div class="product-tuple-image">
                <a class="dp-widget-link" href="https://www.snapdeal.com/product/boat-airdopes/638887459127">
                  <img class="product-image" src="https://n1.sdlcdn.com/imgs/default-product-image.jpg"
                       data-src="https://g.sdlcdn.com/imgs/airdopes.jpg">
                </a>
              </div>
              <p class="product-title">boAt Airdopes 141</p>
              <span class="product-price">Rs. 1,099</span>
              <div class="rating-stars"><div class="filled-stars" style="width:80%"></div></div>
            </div>
          </section></body></html>"#;
        let records = parse(html);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.title.as_deref(), Some("boAt Airdopes 141"));
        assert_eq!(r.price, Some(PriceValue::Amount(1099.0)));
        assert_eq!(r.rating, Some(4.0));
        assert_eq!(r.image_url.as_deref(), Some("https://g.sdlcdn.com/imgs/airdopes.jpg"));
        assert_eq!(
            r.product_url.as_deref(),
            Some("https://www.snapdeal.com/product/boat-airdopes/638887459127")
        );
        assert_eq!(r.product_id.as_deref(), Some("638887459127"));
    }

    #[test]
    fn relative_link_gets_origin_once() {
        let html = r#"<html><body>
            <div class="product-tuple-listing">
              <a class="dp-widget-link" href="/product/cable/1234"></a>
              <p class="product-title">USB Cable</p>
            </div></body></html>"#;
        let records = parse(html);
        assert_eq!(
            records[0].product_url.as_deref(),
            Some("https://www.snapdeal.com/product/cable/1234")
        );
        assert!(records[0].product_id.is_none());
    }

    #[test]
    fn lenient_policy_keeps_title_less_listing() {
        let html = r#"<html><body>
            <div class="product-tuple-listing" id="1">
              <span class="product-price">₹299</span>
            </div></body></html>"#;
        let records = parse(html);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert!(r.title.is_none());
        assert_eq!(r.price, Some(PriceValue::Amount(299.0)));
        assert!(r.rating.is_none(), "absent stars must not become 0.0");
        assert_eq!(r.image_url.as_deref(), Some(NO_IMAGE));
        assert_eq!(r.product_url.as_deref(), Some(NO_URL));
    }

    #[test]
    fn no_listings_yields_empty_result() {
        let html = "<html><body><div class=\"no-result\">Sorry, no results</div></body></html>";
        assert!(parse(html).is_empty());
    }
}
