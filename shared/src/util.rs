//! Small helpers shared by the storefront and back office

use rust_decimal::Decimal;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Normalize a display name into a slug usable as a filter key.
///
/// Lowercases, collapses whitespace runs into single dashes and drops
/// anything that is not alphanumeric or a dash. Matches the key the
/// category mapping falls back to when a document has no `slug` field.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_dash = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Format a price with two decimal places, currency-agnostic
pub fn format_price(price: Decimal) -> String {
    format!("{:.2}", price.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Kitchen"), "kitchen");
        assert_eq!(slugify("Home Decor"), "home-decor");
        assert_eq!(slugify("  Wall   Art  "), "wall-art");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Mugs & Cups"), "mugs-cups");
        assert_eq!(slugify("café"), "café");
        assert_eq!(slugify("a_b-c"), "a-b-c");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(199, 1)), "19.90");
        assert_eq!(format_price(Decimal::ZERO), "0.00");
        assert_eq!(format_price(Decimal::new(9999, 3)), "10.00");
    }
}
