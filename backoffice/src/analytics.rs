//! Analytics dashboard summary

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::models::{Category, Product};
use vitrine_store::{Direction, DocumentStore, Query};

use crate::products::store_error;

/// Bucket for products whose category slug matches no known category
pub const ORPHAN_BUCKET: &str = "(uncategorized)";

/// Product count per category slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub slug: String,
    pub count: usize,
}

/// Price distribution over the whole catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: Decimal,
    pub max: Decimal,
    pub average: Decimal,
}

/// Dashboard summary of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Counts per category slug, largest first
    pub by_category: Vec<CategoryCount>,
    /// Absent when the catalog is empty
    pub price: Option<PriceStats>,
}

/// Aggregate a product list into the dashboard summary
pub fn summarize(products: &[Product], categories: &[Category]) -> CatalogSummary {
    let active = products.iter().filter(|p| p.active).count();

    let known: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for product in products {
        let bucket = if known.contains(&product.category.as_str()) {
            product.category.clone()
        } else {
            ORPHAN_BUCKET.to_string()
        };
        *counts.entry(bucket).or_default() += 1;
    }
    let mut by_category: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(slug, count)| CategoryCount { slug, count })
        .collect();
    by_category.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.slug.cmp(&b.slug)));

    let price = if products.is_empty() {
        None
    } else {
        let mut min = products[0].price;
        let mut max = products[0].price;
        let mut sum = Decimal::ZERO;
        for product in products {
            min = min.min(product.price);
            max = max.max(product.price);
            sum += product.price;
        }
        let average = (sum / Decimal::from(products.len() as u64)).round_dp(2);
        Some(PriceStats { min, max, average })
    };

    CatalogSummary {
        total: products.len(),
        active,
        inactive: products.len() - active,
        by_category,
        price,
    }
}

/// Dashboard service fetching live data from the store
#[derive(Clone)]
pub struct Dashboard<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> Dashboard<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Build the summary from the full catalog, inactive included
    pub async fn summary(&self) -> AppResult<CatalogSummary> {
        let products = self
            .store
            .query(&Query::collection("products").order_by("name", Direction::Asc))
            .await
            .map_err(store_error)?;
        let categories = self
            .store
            .query(&Query::collection("categories").order_by("name", Direction::Asc))
            .await
            .map_err(store_error)?;

        let products: Vec<Product> = products
            .iter()
            .map(|d| shared::mapping::product_from_fields(&d.id, &d.fields))
            .collect();
        let categories: Vec<Category> = categories
            .iter()
            .map(|d| shared::mapping::category_from_fields(&d.id, &d.fields))
            .collect();

        Ok(summarize(&products, &categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, price: i64, active: bool) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_string(),
            category: category.to_string(),
            price: Decimal::new(price, 1),
            description: String::new(),
            link: String::new(),
            image: String::new(),
            images: Vec::new(),
            active,
        }
    }

    fn category(slug: &str) -> Category {
        Category {
            id: slug.to_string(),
            name: slug.to_string(),
            slug: slug.to_string(),
            description: String::new(),
            product_count: 0,
            active: true,
        }
    }

    #[test]
    fn test_summarize_counts_and_prices() {
        let products = vec![
            product("p1", "decor", 199, true),   // 19.9
            product("p2", "kitchen", 95, false), // 9.5
            product("p3", "decor", 450, true),   // 45.0
        ];
        let categories = vec![category("decor"), category("kitchen")];

        let summary = summarize(&products, &categories);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.inactive, 1);
        assert_eq!(summary.by_category[0].slug, "decor");
        assert_eq!(summary.by_category[0].count, 2);

        let price = summary.price.unwrap();
        assert_eq!(price.min, Decimal::new(95, 1));
        assert_eq!(price.max, Decimal::new(450, 1));
        assert_eq!(price.average, Decimal::new(2480, 2)); // (19.9+9.5+45)/3
    }

    #[test]
    fn test_orphan_categories_bucketed() {
        let products = vec![product("p1", "vanished", 100, true)];
        let summary = summarize(&products, &[category("decor")]);
        assert_eq!(summary.by_category[0].slug, ORPHAN_BUCKET);
    }

    #[test]
    fn test_empty_catalog() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.total, 0);
        assert!(summary.price.is_none());
        assert!(summary.by_category.is_empty());
    }
}
