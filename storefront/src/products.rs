//! Products Module
//!
//! Remote fetch (full or cursor-paginated), document mapping with
//! per-field defaults, and the in-memory filter/search pipeline the
//! grid renders from.

use shared::models::Product;
use vitrine_store::{Cursor, Direction, Document, DocumentStore, Query, StoreResult};

use crate::state::{CatalogState, CategoryFilter};

/// Remote collection name
pub const COLLECTION: &str = "products";

pub use shared::mapping::NO_NAME;

/// How a non-empty search term interacts with the category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Search narrows the active category selection (AND)
    #[default]
    Compose,
    /// Search replaces the category selection entirely
    Override,
}

/// Parameters for one remote product fetch
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Order results by name ascending
    pub order_by_name: bool,
    /// Page size; `None` fetches the whole collection
    pub page_size: Option<usize>,
    /// Resume after the last fetched document
    pub cursor: Option<Cursor>,
}

impl ProductQuery {
    fn build(&self) -> Query {
        // The active predicate is enforced remotely, not client-side
        let mut q = Query::collection(COLLECTION).where_eq("active", true);
        if self.order_by_name {
            q = q.order_by("name", Direction::Asc);
        }
        if let Some(size) = self.page_size {
            q = q.limit(size);
        }
        if let Some(cursor) = &self.cursor {
            q = q.start_after(cursor.clone());
        }
        q
    }
}

/// One fetched page of products
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Cursor pointing at the last returned document
    pub cursor: Option<Cursor>,
    /// Whether a further page may exist
    pub has_more: bool,
}

/// Fetch products from the remote store.
///
/// Errors propagate so the caller can fall back to the cache or render
/// the inline failure state; nothing is retried here.
pub async fn fetch_products(
    store: &dyn DocumentStore,
    query: &ProductQuery,
) -> StoreResult<ProductPage> {
    let docs = store.query(&query.build()).await.inspect_err(|e| {
        tracing::warn!(error = %e, "Product fetch failed");
    })?;

    let cursor = docs.last().map(|d| Cursor(d.id.clone()));
    // A short page means the collection is exhausted
    let has_more = match query.page_size {
        Some(size) => docs.len() == size,
        None => false,
    };
    let products: Vec<Product> = docs.iter().map(map_document).collect();

    tracing::debug!(count = products.len(), has_more, "Products fetched");
    Ok(ProductPage {
        products,
        cursor,
        has_more,
    })
}

/// Map a remote document to the [`Product`] shape.
///
/// Every field is defaulted: a malformed or partial document is never
/// rejected, and no `None` survives into the product list.
pub fn map_document(doc: &Document) -> Product {
    shared::mapping::product_from_fields(&doc.id, &doc.fields)
}

/// Case-insensitive substring match against name OR description
pub fn search_matches(product: &Product, term: &str) -> bool {
    let term = term.to_lowercase();
    product.name.to_lowercase().contains(&term)
        || product.description.to_lowercase().contains(&term)
}

/// The products the grid should currently display.
///
/// Returns a filtered copy; closures capturing the result never alias
/// the live list. An empty search term applies the category filter
/// alone; a non-empty term composes with it per `mode`.
pub fn visible_products(state: &CatalogState, mode: SearchMode) -> Vec<Product> {
    let term = state.search.trim();
    state
        .products
        .iter()
        .filter(|p| {
            if term.is_empty() {
                return state.filter.matches(&p.category);
            }
            match mode {
                SearchMode::Compose => {
                    state.filter.matches(&p.category) && search_matches(p, term)
                }
                SearchMode::Override => search_matches(p, term),
            }
        })
        .cloned()
        .collect()
}

/// Append a fetched page, de-duplicating by id against products already
/// in the list. Returns the products that were actually new.
pub fn append_page(state: &mut CatalogState, page: ProductPage) -> Vec<Product> {
    let fresh: Vec<Product> = page
        .products
        .into_iter()
        .filter(|p| state.product_by_id(&p.id).is_none())
        .collect();

    state.products.extend(fresh.iter().cloned());
    state.page.cursor = page.cursor;
    state.page.has_more = page.has_more;
    fresh
}

/// Replace the product list wholesale (fresh fetch or cache load)
pub fn replace_products(state: &mut CatalogState, page: ProductPage) {
    state.products = page.products;
    state.page.cursor = page.cursor;
    state.page.has_more = page.has_more;
}

/// Set the active category filter
pub fn apply_category_filter(state: &mut CatalogState, filter: CategoryFilter) {
    tracing::debug!(?filter, "Category filter applied");
    state.filter = filter;
}

/// Set the search term; an empty term reverts to the category filter
pub fn apply_search(state: &mut CatalogState, term: &str) {
    state.search = term.trim().to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use vitrine_store::Fields;

    fn doc(id: &str, value: serde_json::Value) -> Document {
        Document {
            id: id.to_string(),
            fields: value.as_object().cloned().unwrap_or_else(Fields::new),
        }
    }

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price: Decimal::ZERO,
            description: String::new(),
            link: String::new(),
            image: String::new(),
            images: Vec::new(),
            active: true,
        }
    }

    #[test]
    fn test_map_document_defaults_every_field() {
        let p = map_document(&doc("p1", json!({})));
        assert_eq!(p.id, "p1");
        assert_eq!(p.name, NO_NAME);
        assert_eq!(p.category, "");
        assert_eq!(p.price, Decimal::ZERO);
        assert!(p.description.is_empty());
        assert!(p.images.is_empty());
        assert!(!p.active);
    }

    #[test]
    fn test_map_document_full() {
        let p = map_document(&doc(
            "p1",
            json!({
                "name": "Vase",
                "category": "decor",
                "price": 19.9,
                "description": "Hand made",
                "link": "https://shop.example/vase",
                "image": "vase.jpg",
                "images": ["a.jpg", "b.jpg"],
                "active": true
            }),
        ));
        assert_eq!(p.name, "Vase");
        assert_eq!(p.price, Decimal::try_from(19.9).unwrap());
        assert_eq!(p.images, vec!["a.jpg", "b.jpg"]);
        assert!(p.active);
    }

    #[test]
    fn test_map_document_tolerates_wrong_types() {
        let p = map_document(&doc(
            "p1",
            json!({"name": 42, "price": "not-a-number", "images": "vase.jpg"}),
        ));
        assert_eq!(p.name, NO_NAME);
        assert_eq!(p.price, Decimal::ZERO);
        assert!(p.images.is_empty());
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let mut p = product("p1", "Ceramic Mug", "kitchen");
        p.description = "Stoneware, 300ml".to_string();

        assert!(search_matches(&p, "mu"));
        assert!(search_matches(&p, "MUG"));
        assert!(search_matches(&p, "stoneware"));
        assert!(!search_matches(&p, "vase"));
    }

    #[test]
    fn test_visible_products_category_only() {
        let mut state = CatalogState::new();
        state.products = vec![
            product("p1", "Vase", "decor"),
            product("p2", "Mug", "kitchen"),
        ];
        state.filter = CategoryFilter::One("decor".to_string());

        let visible = visible_products(&state, SearchMode::Compose);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Vase");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut state = CatalogState::new();
        state.products = vec![
            product("p1", "Vase", "decor"),
            product("p2", "Mug", "kitchen"),
        ];

        apply_category_filter(&mut state, CategoryFilter::One("decor".to_string()));
        let once = visible_products(&state, SearchMode::Compose);
        apply_category_filter(&mut state, CategoryFilter::One("decor".to_string()));
        let twice = visible_products(&state, SearchMode::Compose);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_search_restores_category_set() {
        let mut state = CatalogState::new();
        state.products = vec![
            product("p1", "Vase", "decor"),
            product("p2", "Mug", "kitchen"),
            product("p3", "Lamp", "decor"),
        ];
        state.filter = CategoryFilter::One("decor".to_string());

        let category_only = visible_products(&state, SearchMode::Compose);

        apply_search(&mut state, "lamp");
        assert_eq!(visible_products(&state, SearchMode::Compose).len(), 1);

        apply_search(&mut state, "");
        assert_eq!(visible_products(&state, SearchMode::Compose), category_only);
    }

    #[test]
    fn test_search_composes_with_category() {
        let mut state = CatalogState::new();
        state.products = vec![
            product("p1", "Ceramic Vase", "decor"),
            product("p2", "Ceramic Mug", "kitchen"),
        ];
        state.filter = CategoryFilter::One("kitchen".to_string());
        state.search = "ceramic".to_string();

        // Compose: category still applies
        let composed = visible_products(&state, SearchMode::Compose);
        assert_eq!(composed.len(), 1);
        assert_eq!(composed[0].id, "p2");

        // Override: search stands alone
        let overridden = visible_products(&state, SearchMode::Override);
        assert_eq!(overridden.len(), 2);
    }

    #[test]
    fn test_append_page_deduplicates() {
        let mut state = CatalogState::new();
        state.products = vec![product("p1", "Vase", "decor")];

        let fresh = append_page(
            &mut state,
            ProductPage {
                products: vec![product("p1", "Vase", "decor"), product("p2", "Mug", "kitchen")],
                cursor: Some(Cursor("p2".to_string())),
                has_more: true,
            },
        );

        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id, "p2");
        assert_eq!(state.products.len(), 2);
        assert!(state.page.has_more);
    }
}
