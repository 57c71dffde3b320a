//! Slug helpers.
//!
//! Slugs are Unicode-aware: letters and digits from any script are allowed
//! alongside `_` and `-`.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum stored slug length
pub const SLUG_MAX_LENGTH: usize = 50;

static VALID_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-\w]+\z").expect("slug pattern compiles"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("disallowed pattern compiles"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("separator pattern compiles"));

/// Derives a slug from free text.
///
/// Lowercases, drops anything that is not a word character, whitespace or
/// hyphen, collapses whitespace/hyphen runs into a single `-`, and trims
/// leading and trailing `-` and `_`.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let joined = SEPARATORS.replace_all(&stripped, "-");
    joined.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Whether `value` is acceptable as a stored slug.
pub fn is_valid_slug(value: &str) -> bool {
    value.chars().count() <= SLUG_MAX_LENGTH && VALID_SLUG.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Summer   Sale -- 2018 "), "summer-sale-2018");
    }

    #[test]
    fn slugify_drops_punctuation() {
        assert_eq!(slugify("Fashion & Beauty!"), "fashion-beauty");
        assert_eq!(slugify("__hidden__"), "hidden");
    }

    #[test]
    fn slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Çok Güzel"), "çok-güzel");
    }

    #[test]
    fn validates_slugs() {
        assert!(is_valid_slug("summer-sale"));
        assert!(is_valid_slug("güzel_ürün"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("summer sale"));
        assert!(!is_valid_slug("summer/sale"));
        assert!(!is_valid_slug(&"a".repeat(SLUG_MAX_LENGTH + 1)));
        assert!(is_valid_slug(&"a".repeat(SLUG_MAX_LENGTH)));
    }
}
