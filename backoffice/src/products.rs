//! Admin product CRUD

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use serde_json::{Value, json};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Product, ProductUpdate};
use vitrine_store::{Direction, DocumentStore, Fields, Query, StoreError};

use crate::forms::{ProductForm, validate_form};

const COLLECTION: &str = "products";

pub(crate) fn store_error(e: StoreError) -> AppError {
    match e {
        StoreError::NotFound { collection, id } => {
            AppError::not_found(format!("{}/{}", collection, id))
        }
        other => AppError::store(other.to_string()),
    }
}

fn object(value: Value) -> Fields {
    value.as_object().cloned().unwrap_or_default()
}

/// Product administration service
#[derive(Clone)]
pub struct AdminProducts<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> AdminProducts<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// List every product, inactive ones included, ordered by name
    pub async fn list_all(&self) -> AppResult<Vec<Product>> {
        let query = Query::collection(COLLECTION).order_by("name", Direction::Asc);
        let docs = self.store.query(&query).await.map_err(store_error)?;
        Ok(docs.iter().map(map_product).collect())
    }

    /// Create a product from a validated form. New products start active.
    pub async fn create(&self, form: ProductForm) -> AppResult<Product> {
        validate_form(&form)?;

        let fields = object(json!({
            "name": form.name,
            "category": form.category,
            "price": form.price.to_f64().unwrap_or(0.0),
            "description": form.description,
            "link": form.link.unwrap_or_default(),
            "image": form.image.unwrap_or_default(),
            "images": form.images,
            "active": true,
        }));

        let doc = self.store.add(COLLECTION, fields).await.map_err(store_error)?;
        tracing::info!(id = %doc.id, "Product created");
        Ok(map_product(&doc))
    }

    /// Partial update: only provided fields reach the store
    pub async fn update(&self, id: &str, update: ProductUpdate) -> AppResult<Product> {
        let mut patch = Fields::new();
        if let Some(name) = update.name {
            patch.insert("name".to_string(), Value::from(name));
        }
        if let Some(category) = update.category {
            patch.insert("category".to_string(), Value::from(category));
        }
        if let Some(price) = update.price {
            if price.is_sign_negative() {
                return Err(AppError::new(ErrorCode::ProductInvalidPrice));
            }
            patch.insert("price".to_string(), Value::from(price.to_f64().unwrap_or(0.0)));
        }
        if let Some(description) = update.description {
            patch.insert("description".to_string(), Value::from(description));
        }
        if let Some(link) = update.link {
            patch.insert("link".to_string(), Value::from(link));
        }
        if let Some(image) = update.image {
            patch.insert("image".to_string(), Value::from(image));
        }
        if let Some(images) = update.images {
            patch.insert("images".to_string(), Value::from(images));
        }
        if let Some(active) = update.active {
            patch.insert("active".to_string(), Value::from(active));
        }

        if patch.is_empty() {
            let doc = self
                .store
                .get(COLLECTION, id)
                .await
                .map_err(store_error)?
                .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
            return Ok(map_product(&doc));
        }

        let doc = self
            .store
            .update(COLLECTION, id, patch)
            .await
            .map_err(store_error)?;
        tracing::info!(id = %id, "Product updated");
        Ok(map_product(&doc))
    }

    /// Toggle a product's storefront visibility
    pub async fn set_active(&self, id: &str, active: bool) -> AppResult<Product> {
        self.update(
            id,
            ProductUpdate {
                active: Some(active),
                ..ProductUpdate::default()
            },
        )
        .await
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store
            .delete(COLLECTION, id)
            .await
            .map_err(store_error)?;
        tracing::info!(id = %id, "Product deleted");
        Ok(())
    }
}

/// Same mapping the storefront uses: defaults for every field, partial
/// documents tolerated.
fn map_product(doc: &vitrine_store::Document) -> Product {
    shared::mapping::product_from_fields(&doc.id, &doc.fields)
}
