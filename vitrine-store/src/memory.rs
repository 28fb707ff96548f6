//! In-memory document store
//!
//! In-process stand-in for the managed backend, implementing the full
//! [`DocumentStore`] contract. Tests and demos seed it with fixture
//! documents; it additionally records query counts and committed batches
//! so tests can assert on call patterns (one in-flight page fetch, one
//! batch per bulk operation).

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use crate::document::{
    BatchOp, Cursor, Direction, Document, DocumentStore, Fields, Query, WriteBatch,
};
use crate::error::{StoreError, StoreResult};

/// In-memory document store backed by one collection map per name
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Fields>>>,
    query_count: AtomicUsize,
    committed: RwLock<Vec<WriteBatch>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document under a caller-chosen id (fixture seeding)
    pub fn insert_with_id(&self, collection: &str, id: &str, fields: Fields) {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
    }

    /// Number of `query` calls served so far
    pub fn query_count(&self) -> usize {
        self.query_count.load(Ordering::SeqCst)
    }

    /// Batches applied through `commit`, in order
    pub fn committed_batches(&self) -> Vec<WriteBatch> {
        self.committed.read().clone()
    }

    /// Number of documents currently stored in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

/// Total order over JSON values for order-by evaluation.
///
/// Cross-type comparisons rank by type (null < bool < number < string <
/// everything else) so a collection with missing or mistyped fields still
/// sorts deterministically.
fn cmp_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering::*;
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            _ => 4,
        }
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn matches_filters(fields: &Fields, query: &Query) -> bool {
    query
        .filters
        .iter()
        .all(|f| fields.get(&f.field) == Some(&f.value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
        self.query_count.fetch_add(1, Ordering::SeqCst);

        let collections = self.collections.read();
        let mut docs: Vec<Document> = collections
            .get(&query.collection)
            .map(|c| {
                c.iter()
                    .filter(|(_, fields)| matches_filters(fields, query))
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            docs.sort_by(|a, b| {
                let null = Value::Null;
                let va = a.get(&order.field).unwrap_or(&null);
                let vb = b.get(&order.field).unwrap_or(&null);
                let ord = cmp_values(va, vb).then_with(|| a.id.cmp(&b.id));
                match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        if let Some(Cursor(after_id)) = &query.start_after {
            let pos = docs
                .iter()
                .position(|d| &d.id == after_id)
                .ok_or_else(|| StoreError::CursorInvalid(after_id.clone()))?;
            docs.drain(..=pos);
        }

        if let Some(limit) = query.limit {
            docs.truncate(limit);
        }

        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let collections = self.collections.read();
        Ok(collections.get(collection).and_then(|c| {
            c.get(id).map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            })
        }))
    }

    async fn add(&self, collection: &str, fields: Fields) -> StoreResult<Document> {
        let id = Uuid::new_v4().to_string();
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields.clone());
        tracing::debug!(collection = %collection, id = %id, "Document added");
        Ok(Document { id, fields })
    }

    async fn update(&self, collection: &str, id: &str, patch: Fields) -> StoreResult<Document> {
        let mut collections = self.collections.write();
        let doc = collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        for (key, value) in patch {
            doc.insert(key, value);
        }

        Ok(Document {
            id: id.to_string(),
            fields: doc.clone(),
        })
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut collections = self.collections.write();
        let removed = collections
            .get_mut(collection)
            .and_then(|c| c.remove(id))
            .is_some();
        if !removed {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut collections = self.collections.write();

        // Validate every target before touching anything; a rejected
        // batch leaves the store unchanged.
        for op in batch.ops() {
            let (collection, id) = match op {
                BatchOp::Update { collection, id, .. } => (collection, id),
                BatchOp::Delete { collection, id } => (collection, id),
            };
            let exists = collections
                .get(collection)
                .map(|c| c.contains_key(id))
                .unwrap_or(false);
            if !exists {
                return Err(StoreError::BatchRejected(format!(
                    "{}/{} does not exist",
                    collection, id
                )));
            }
        }

        for op in batch.ops() {
            match op {
                BatchOp::Update {
                    collection,
                    id,
                    patch,
                } => {
                    let doc = collections
                        .get_mut(collection)
                        .and_then(|c| c.get_mut(id))
                        .expect("validated above");
                    for (key, value) in patch {
                        doc.insert(key.clone(), value.clone());
                    }
                }
                BatchOp::Delete { collection, id } => {
                    collections
                        .get_mut(collection)
                        .expect("validated above")
                        .remove(id);
                }
            }
        }

        tracing::debug!(ops = batch.len(), "Batch committed");
        self.committed.write().push(batch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_values_numbers() {
        assert_eq!(
            cmp_values(&Value::from(1.5), &Value::from(2)),
            std::cmp::Ordering::Less
        );
    }

    #[test]
    fn test_cmp_values_cross_type() {
        assert_eq!(
            cmp_values(&Value::Null, &Value::from("a")),
            std::cmp::Ordering::Less
        );
        assert_eq!(
            cmp_values(&Value::from(false), &Value::from(0)),
            std::cmp::Ordering::Less
        );
    }
}
