//! Catalog application state
//!
//! One explicit state struct owned by the orchestrator and passed into
//! module functions. The product array is only ever replaced wholesale
//! (fresh fetch) or appended to (pagination); render passes work on a
//! filtered copy, never the live reference.

use shared::models::{Category, Product};
use vitrine_store::Cursor;

/// Active category filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category restriction
    #[default]
    All,
    /// A single category slug
    One(String),
    /// Multiple slugs, OR'd
    Many(Vec<String>),
}

impl CategoryFilter {
    /// Build a filter from a slug set (empty means no restriction)
    pub fn from_slugs(mut slugs: Vec<String>) -> Self {
        match slugs.len() {
            0 => Self::All,
            1 => Self::One(slugs.remove(0)),
            _ => Self::Many(slugs),
        }
    }

    /// Whether a product with this category slug passes the filter
    pub fn matches(&self, slug: &str) -> bool {
        match self {
            Self::All => true,
            Self::One(s) => s == slug,
            Self::Many(slugs) => slugs.iter().any(|s| s == slug),
        }
    }
}

/// Cursor pagination state
#[derive(Debug, Clone, Default)]
pub struct PageState {
    /// Reference to the last fetched document
    pub cursor: Option<Cursor>,
    /// Whether another page may exist
    pub has_more: bool,
}

/// In-memory state of the storefront
#[derive(Debug, Default)]
pub struct CatalogState {
    /// Product list mirrored from the remote store (or cache)
    pub products: Vec<Product>,
    /// Known categories, ordered by name
    pub categories: Vec<Category>,
    /// Active category filter
    pub filter: CategoryFilter,
    /// Current search term (empty when inactive)
    pub search: String,
    /// Pagination state
    pub page: PageState,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a product by identifier
    pub fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_slugs() {
        assert_eq!(CategoryFilter::from_slugs(vec![]), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_slugs(vec!["decor".to_string()]),
            CategoryFilter::One("decor".to_string())
        );
        assert!(matches!(
            CategoryFilter::from_slugs(vec!["a".to_string(), "b".to_string()]),
            CategoryFilter::Many(_)
        ));
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches("anything"));
        assert!(CategoryFilter::One("decor".to_string()).matches("decor"));
        assert!(!CategoryFilter::One("decor".to_string()).matches("kitchen"));

        let many = CategoryFilter::Many(vec!["decor".to_string(), "kitchen".to_string()]);
        assert!(many.matches("kitchen"));
        assert!(!many.matches("office"));
    }
}
