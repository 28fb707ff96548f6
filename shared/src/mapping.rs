//! Remote document -> model mapping
//!
//! Both surfaces map documents the same way: every field is defaulted,
//! a malformed or partial document is never rejected, and nothing
//! optional survives unmapped.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::models::{Category, Product};
use crate::util::slugify;

/// Sentinel used when a product document carries no name
pub const NO_NAME: &str = "no name";

fn string_field(fields: &Map<String, Value>, field: &str) -> Option<String> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Map a product document's fields, defaulting everything missing
pub fn product_from_fields(id: &str, fields: &Map<String, Value>) -> Product {
    Product {
        id: id.to_string(),
        name: string_field(fields, "name").unwrap_or_else(|| NO_NAME.to_string()),
        category: string_field(fields, "category").unwrap_or_default(),
        price: fields
            .get("price")
            .and_then(Value::as_f64)
            .and_then(|p| Decimal::try_from(p).ok())
            .unwrap_or_default(),
        description: string_field(fields, "description").unwrap_or_default(),
        link: string_field(fields, "link").unwrap_or_default(),
        image: string_field(fields, "image").unwrap_or_default(),
        images: fields
            .get("images")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        active: fields.get("active").and_then(Value::as_bool).unwrap_or(false),
    }
}

/// Map a category document's fields; `slug` falls back to the
/// normalized name when absent
pub fn category_from_fields(id: &str, fields: &Map<String, Value>) -> Category {
    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let slug = string_field(fields, "slug").unwrap_or_else(|| slugify(&name));

    Category {
        id: id.to_string(),
        name,
        slug,
        description: string_field(fields, "description").unwrap_or_default(),
        product_count: fields
            .get("product_count")
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32,
        active: fields.get("active").and_then(Value::as_bool).unwrap_or(true),
    }
}
