//! Categories Module
//!
//! Fetches the category list and keeps the filter bar in sync. Category
//! load failure must never block product display, so every error path
//! collapses to an empty list.

use shared::models::Category;
use vitrine_store::{Direction, Document, DocumentStore, Query};

/// Remote collection name
pub const COLLECTION: &str = "categories";

/// Fetch all categories ordered by name.
///
/// Errors are logged and swallowed: the storefront degrades to an
/// unfiltered grid rather than failing the page.
pub async fn load_categories(store: &dyn DocumentStore) -> Vec<Category> {
    let query = Query::collection(COLLECTION).order_by("name", Direction::Asc);

    match store.query(&query).await {
        Ok(docs) => {
            let categories: Vec<Category> = docs.iter().map(map_document).collect();
            tracing::debug!(count = categories.len(), "Categories loaded");
            categories
        }
        Err(e) => {
            tracing::warn!(error = %e, "Category load failed, continuing without filters");
            Vec::new()
        }
    }
}

/// Map a remote document to the [`Category`] shape.
///
/// `slug` falls back to the normalized name when the document omits it.
pub fn map_document(doc: &Document) -> Category {
    shared::mapping::category_from_fields(&doc.id, &doc.fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vitrine_store::Fields;

    fn doc(id: &str, value: serde_json::Value) -> Document {
        Document {
            id: id.to_string(),
            fields: value.as_object().cloned().unwrap_or_else(Fields::new),
        }
    }

    #[test]
    fn test_map_document_with_slug() {
        let c = map_document(&doc("c1", json!({"name": "Home Decor", "slug": "decor"})));
        assert_eq!(c.slug, "decor");
        assert_eq!(c.name, "Home Decor");
    }

    #[test]
    fn test_slug_defaults_from_name() {
        let c = map_document(&doc("c1", json!({"name": "Home Decor"})));
        assert_eq!(c.slug, "home-decor");
    }

    #[test]
    fn test_map_document_empty() {
        let c = map_document(&doc("c1", json!({})));
        assert_eq!(c.name, "");
        assert_eq!(c.slug, "");
        assert!(c.active);
    }
}
