//! Image Fallback Helper
//!
//! Builds dual-format image markup: a modern WebP source plus the
//! original file as the legacy fallback, so browsers without WebP
//! support still get an image.

use maud::{Markup, html};

/// Extensions we offer a WebP variant for
const LEGACY_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// WebP variant URL for a legacy-format image, if one can be derived
pub fn webp_variant(url: &str) -> Option<String> {
    let lower = url.to_lowercase();
    LEGACY_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map(|ext| format!("{}.webp", &url[..url.len() - ext.len()]))
}

/// `<picture>` fragment with a WebP source and legacy `<img>` fallback.
///
/// URLs already in a modern format (or with no recognizable extension)
/// render as a bare `<img>`.
pub fn picture(url: &str, alt: &str) -> Markup {
    match webp_variant(url) {
        Some(webp) => html! {
            picture {
                source type="image/webp" srcset=(webp);
                img src=(url) alt=(alt) loading="lazy";
            }
        },
        None => html! {
            img src=(url) alt=(alt) loading="lazy";
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webp_variant() {
        assert_eq!(webp_variant("vase.jpg"), Some("vase.webp".to_string()));
        assert_eq!(webp_variant("photo.JPEG"), Some("photo.webp".to_string()));
        assert_eq!(webp_variant("img.png"), Some("img.webp".to_string()));
        assert_eq!(webp_variant("img.webp"), None);
        assert_eq!(webp_variant("no-extension"), None);
    }

    #[test]
    fn test_picture_dual_format() {
        let html = picture("vase.jpg", "Vase").into_string();
        assert!(html.contains("<picture>"));
        assert!(html.contains(r#"srcset="vase.webp""#));
        assert!(html.contains(r#"src="vase.jpg""#));
    }

    #[test]
    fn test_picture_modern_format_plain_img() {
        let html = picture("vase.webp", "Vase").into_string();
        assert!(!html.contains("<picture>"));
        assert!(html.contains(r#"src="vase.webp""#));
    }
}
