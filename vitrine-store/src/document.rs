//! Document store contract
//!
//! Models the query surface of the remote document database the catalog
//! is built against: equality predicates, a single order-by field, a
//! result limit, and start-after cursor pagination. Documents are
//! returned as key-value maps plus a stable identifier.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreResult;

/// Field map of a document as stored remotely
pub type Fields = serde_json::Map<String, Value>;

/// A document returned by the remote store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier issued by the store
    pub id: String,
    /// Document payload
    pub fields: Fields,
}

impl Document {
    /// Look up a field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Opaque pagination cursor: a reference to the last-fetched document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor(pub String);

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Asc,
    Desc,
}

/// Order-by clause (single field)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Equality predicate on one field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

/// Collection query
///
/// Built fluently:
///
/// ```
/// use vitrine_store::{Direction, Query};
///
/// let q = Query::collection("products")
///     .where_eq("active", true)
///     .order_by("name", Direction::Asc)
///     .limit(12);
/// assert_eq!(q.filters.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    /// Collection name: "products", "categories", etc.
    pub collection: String,
    /// Equality predicates, AND-combined
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Sort order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderBy>,
    /// Maximum number of documents to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Resume after the document this cursor points at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_after: Option<Cursor>,
}

impl Query {
    /// Create a query over a collection
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            filters: Vec::new(),
            order: None,
            limit: None,
            start_after: None,
        }
    }

    /// Add an equality predicate
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add a sort order
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Cap the number of returned documents
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resume after a previously returned document
    pub fn start_after(mut self, cursor: Cursor) -> Self {
        self.start_after = Some(cursor);
        self
    }
}

/// One operation inside a [`WriteBatch`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BatchOp {
    /// Partial update: merge `patch` into the document's fields
    Update {
        collection: String,
        id: String,
        patch: Fields,
    },
    /// Delete the document
    Delete { collection: String, id: String },
}

/// Atomic multi-document write
///
/// Either every operation applies or none does.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a partial update
    pub fn update(mut self, collection: impl Into<String>, id: impl Into<String>, patch: Fields) -> Self {
        self.ops.push(BatchOp::Update {
            collection: collection.into(),
            id: id.into(),
            patch,
        });
        self
    }

    /// Queue a delete
    pub fn delete(mut self, collection: impl Into<String>, id: impl Into<String>) -> Self {
        self.ops.push(BatchOp::Delete {
            collection: collection.into(),
            id: id.into(),
        });
        self
    }

    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Remote document store contract
///
/// Implementations must treat [`WriteBatch`] commits as atomic: a
/// rejected batch leaves every targeted document untouched.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a predicate query against a collection
    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>>;

    /// Fetch a single document by id
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Add a new document; the store issues the id
    async fn add(&self, collection: &str, fields: Fields) -> StoreResult<Document>;

    /// Partial update: merge `patch` into the existing fields
    async fn update(&self, collection: &str, id: &str, patch: Fields) -> StoreResult<Document>;

    /// Delete a document
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Apply a batch atomically
    async fn commit(&self, batch: WriteBatch) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let q = Query::collection("products")
            .where_eq("active", true)
            .where_eq("category", "decor")
            .order_by("name", Direction::Asc)
            .limit(12)
            .start_after(Cursor("p9".to_string()));

        assert_eq!(q.collection, "products");
        assert_eq!(q.filters.len(), 2);
        assert_eq!(q.filters[1].value, Value::from("decor"));
        assert_eq!(q.limit, Some(12));
        assert_eq!(q.start_after, Some(Cursor("p9".to_string())));
    }

    #[test]
    fn test_batch_builder() {
        let mut patch = Fields::new();
        patch.insert("active".to_string(), Value::from(false));

        let batch = WriteBatch::new()
            .update("products", "p1", patch)
            .delete("products", "p2");

        assert_eq!(batch.len(), 2);
        assert!(matches!(batch.ops()[1], BatchOp::Delete { ref id, .. } if id == "p2"));
    }
}
