//! Admin category CRUD
//!
//! Categories join products by slug, never by display name, so renaming
//! a category cannot silently detach or re-attach products. Deleting a
//! category that active products still reference is blocked outright.

use std::sync::Arc;

use serde_json::{Value, json};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Category, CategoryUpdate};
use shared::util::slugify;
use vitrine_store::{Direction, DocumentStore, Fields, Query};

use crate::forms::{CategoryForm, validate_form};
use crate::products::store_error;

const COLLECTION: &str = "categories";
const PRODUCTS: &str = "products";

fn map_category(doc: &vitrine_store::Document) -> Category {
    shared::mapping::category_from_fields(&doc.id, &doc.fields)
}

/// Category administration service
#[derive(Clone)]
pub struct AdminCategories<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> AdminCategories<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// List every category ordered by name
    pub async fn list_all(&self) -> AppResult<Vec<Category>> {
        let query = Query::collection(COLLECTION).order_by("name", Direction::Asc);
        let docs = self.store.query(&query).await.map_err(store_error)?;
        Ok(docs.iter().map(map_category).collect())
    }

    /// Create a category; the slug derives from the name when omitted
    pub async fn create(&self, form: CategoryForm) -> AppResult<Category> {
        validate_form(&form)?;

        let slug = form
            .slug
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&form.name));
        self.ensure_slug_free(&slug).await?;

        let fields = json!({
            "name": form.name,
            "slug": slug,
            "description": form.description,
            "active": true,
        });
        let fields: Fields = fields.as_object().cloned().unwrap_or_default();

        let doc = self.store.add(COLLECTION, fields).await.map_err(store_error)?;
        tracing::info!(id = %doc.id, "Category created");
        Ok(map_category(&doc))
    }

    /// Partial update. The slug never changes implicitly: a rename
    /// leaves it untouched, only an explicit new slug replaces it.
    pub async fn update(&self, id: &str, update: CategoryUpdate) -> AppResult<Category> {
        let mut patch = Fields::new();
        if let Some(name) = update.name {
            patch.insert("name".to_string(), Value::from(name));
        }
        if let Some(slug) = update.slug {
            self.ensure_slug_free(&slug).await?;
            patch.insert("slug".to_string(), Value::from(slug));
        }
        if let Some(description) = update.description {
            patch.insert("description".to_string(), Value::from(description));
        }
        if let Some(active) = update.active {
            patch.insert("active".to_string(), Value::from(active));
        }

        let doc = self
            .store
            .update(COLLECTION, id, patch)
            .await
            .map_err(store_error)?;
        tracing::info!(id = %id, "Category updated");
        Ok(map_category(&doc))
    }

    /// Delete a category.
    ///
    /// Blocked outright when active products still reference the slug;
    /// nothing cascades.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let category = self
            .store
            .get(COLLECTION, id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
        let category = map_category(&category);

        let in_use = self
            .store
            .query(
                &Query::collection(PRODUCTS)
                    .where_eq("category", category.slug.clone())
                    .where_eq("active", true),
            )
            .await
            .map_err(store_error)?;

        if !in_use.is_empty() {
            tracing::warn!(
                slug = %category.slug,
                product_count = in_use.len(),
                "Category delete blocked: still referenced"
            );
            return Err(AppError::new(ErrorCode::CategoryInUse)
                .with_detail("slug", category.slug)
                .with_detail("product_count", in_use.len()));
        }

        self.store
            .delete(COLLECTION, id)
            .await
            .map_err(store_error)?;
        tracing::info!(id = %id, "Category deleted");
        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &str) -> AppResult<()> {
        let existing = self
            .store
            .query(&Query::collection(COLLECTION).where_eq("slug", slug))
            .await
            .map_err(store_error)?;
        if existing.is_empty() {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::CategorySlugExists).with_detail("slug", slug))
        }
    }
}
