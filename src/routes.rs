//! Route reversal for advertisement URLs.
//!
//! Routing itself lives in the web layer; this module only knows the path
//! shape of the routes that models link to.

use thiserror::Error;
use url::form_urlencoded::byte_serialize;

/// Name of the route that shows an advertisement's publish view
pub const ADVERTISEMENT_PUBLISH: &str = "advertisement:publish";

/// Errors raised while building a model URL.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("advertisement {pk} has no adv_slug_name; route {route} needs one", route = ADVERTISEMENT_PUBLISH)]
    MissingSlug { pk: i32 },
}

/// Path for [`ADVERTISEMENT_PUBLISH`]: `/advertisement/{adv_slug_name}/{pk}/publish/`.
///
/// The slug is percent-encoded so Unicode slugs stay routable.
pub fn advertisement_publish(adv_slug_name: &str, pk: i32) -> String {
    let slug: String = byte_serialize(adv_slug_name.as_bytes()).collect();
    format!("/advertisement/{slug}/{pk}/publish/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_slug_is_left_as_is() {
        assert_eq!(
            advertisement_publish("summer-sale_2018", 12),
            "/advertisement/summer-sale_2018/12/publish/"
        );
    }

    #[test]
    fn unicode_slug_is_percent_encoded() {
        assert_eq!(
            advertisement_publish("ürün", 3),
            "/advertisement/%C3%BCr%C3%BCn/3/publish/"
        );
    }

    #[test]
    fn missing_slug_error_names_the_route() {
        let err = UrlError::MissingSlug { pk: 4 };
        let message = err.to_string();
        assert!(message.contains("advertisement 4"));
        assert!(message.contains(ADVERTISEMENT_PUBLISH));
    }
}
