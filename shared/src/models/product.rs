//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Category reference (slug, matched against [`super::Category::slug`])
    pub category: String,
    /// Non-negative, currency-agnostic; rendered with 2-decimal formatting
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    /// Outbound purchase URL, may be empty
    #[serde(default)]
    pub link: String,
    /// Primary display image URL
    #[serde(default)]
    pub image: String,
    /// Ordered gallery URLs; when non-empty, supersedes `image`
    #[serde(default)]
    pub images: Vec<String>,
    /// Only active products are shown on the public storefront
    pub active: bool,
}

impl Product {
    /// Gallery image URLs for display.
    ///
    /// `images` wins when non-empty, otherwise the single `image` field
    /// (skipped entirely when that is empty too).
    pub fn gallery(&self) -> Vec<&str> {
        if !self.images.is_empty() {
            self.images.iter().map(String::as_str).collect()
        } else if !self.image.is_empty() {
            vec![self.image.as_str()]
        } else {
            Vec::new()
        }
    }

    /// Canonical primary image URL, if any
    pub fn primary_image(&self) -> Option<&str> {
        self.gallery().first().copied()
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Update product payload (partial; only provided fields are written)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Vase".to_string(),
            category: "decor".to_string(),
            price: Decimal::new(199, 1),
            description: String::new(),
            link: String::new(),
            image: "vase.jpg".to_string(),
            images: Vec::new(),
            active: true,
        }
    }

    #[test]
    fn test_gallery_falls_back_to_image() {
        let p = product();
        assert_eq!(p.gallery(), vec!["vase.jpg"]);
        assert_eq!(p.primary_image(), Some("vase.jpg"));
    }

    #[test]
    fn test_gallery_supersedes_image() {
        let mut p = product();
        p.images = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        assert_eq!(p.gallery(), vec!["a.jpg", "b.jpg"]);
        assert_eq!(p.primary_image(), Some("a.jpg"));
    }

    #[test]
    fn test_gallery_empty() {
        let mut p = product();
        p.image = String::new();
        assert!(p.gallery().is_empty());
        assert_eq!(p.primary_image(), None);
    }
}
