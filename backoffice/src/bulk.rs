//! Bulk operations
//!
//! Admin bulk actions run over an ephemeral selection of product ids.
//! Each completed operation issues exactly one atomic batched write and
//! clears the selection; destructive ones additionally require an
//! explicit confirmation token from the caller's confirm step.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use vitrine_store::{DocumentStore, Fields, WriteBatch};

use crate::products::store_error;

const COLLECTION: &str = "products";

/// Ephemeral set of selected product ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership; returns whether the id is now selected
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<String> for Selection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Outcome of the caller's confirmation step for destructive actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Pending,
    Confirmed,
}

/// Bulk product actions
#[derive(Clone)]
pub struct BulkActions<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> BulkActions<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Delete every selected product in one atomic batch.
    ///
    /// Requires an explicit [`Confirmation::Confirmed`]; the selection
    /// is cleared only after the batch commits.
    pub async fn delete(
        &self,
        selection: &mut Selection,
        confirmation: Confirmation,
    ) -> AppResult<usize> {
        if selection.is_empty() {
            return Ok(0);
        }
        if confirmation != Confirmation::Confirmed {
            return Err(AppError::with_message(
                ErrorCode::InvalidRequest,
                "Bulk delete requires explicit confirmation",
            ));
        }

        let ids = selection.ids();
        let batch = ids
            .iter()
            .fold(WriteBatch::new(), |batch, id| batch.delete(COLLECTION, id));

        self.store.commit(batch).await.map_err(store_error)?;
        selection.clear();

        tracing::info!(count = ids.len(), "Bulk delete committed");
        Ok(ids.len())
    }

    /// Activate or deactivate every selected product in one atomic
    /// batch, then clear the selection.
    pub async fn set_active(&self, selection: &mut Selection, active: bool) -> AppResult<usize> {
        if selection.is_empty() {
            return Ok(0);
        }

        let ids = selection.ids();
        let batch = ids.iter().fold(WriteBatch::new(), |batch, id| {
            let mut patch = Fields::new();
            patch.insert("active".to_string(), Value::from(active));
            batch.update(COLLECTION, id, patch)
        });

        self.store.commit(batch).await.map_err(store_error)?;
        selection.clear();

        tracing::info!(count = ids.len(), active, "Bulk visibility change committed");
        Ok(ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_toggle_and_clear() {
        let mut selection = Selection::new();
        assert!(selection.toggle("p1"));
        assert!(selection.toggle("p2"));
        assert!(!selection.toggle("p1"));
        assert_eq!(selection.ids(), vec!["p2".to_string()]);

        selection.clear();
        assert!(selection.is_empty());
    }
}
