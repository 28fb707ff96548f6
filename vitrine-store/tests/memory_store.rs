//! MemoryStore contract tests: predicates, ordering, cursor pagination,
//! and batch atomicity.
//! Run: cargo test -p vitrine-store --test memory_store

use serde_json::json;
use vitrine_store::{
    Cursor, Direction, DocumentStore, Fields, MemoryStore, Query, StoreError, WriteBatch,
};

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().expect("object fixture").clone()
}

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert_with_id(
        "products",
        "p1",
        fields(json!({"name": "Vase", "category": "decor", "price": 19.9, "active": true})),
    );
    store.insert_with_id(
        "products",
        "p2",
        fields(json!({"name": "Mug", "category": "kitchen", "price": 9.5, "active": false})),
    );
    store.insert_with_id(
        "products",
        "p3",
        fields(json!({"name": "Bowl", "category": "kitchen", "price": 12.0, "active": true})),
    );
    store.insert_with_id(
        "products",
        "p4",
        fields(json!({"name": "Lamp", "category": "decor", "price": 45.0, "active": true})),
    );
    store
}

#[tokio::test]
async fn equality_predicates_are_anded() {
    let store = seeded_store();

    let docs = store
        .query(
            &Query::collection("products")
                .where_eq("active", true)
                .where_eq("category", "kitchen"),
        )
        .await
        .unwrap();

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "p3");
}

#[tokio::test]
async fn order_by_name_ascending() {
    let store = seeded_store();

    let docs = store
        .query(
            &Query::collection("products")
                .where_eq("active", true)
                .order_by("name", Direction::Asc),
        )
        .await
        .unwrap();

    let names: Vec<_> = docs
        .iter()
        .map(|d| d.get("name").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bowl", "Lamp", "Vase"]);
}

#[tokio::test]
async fn cursor_pagination_resumes_after_last_seen() {
    let store = seeded_store();
    let base = Query::collection("products")
        .where_eq("active", true)
        .order_by("name", Direction::Asc)
        .limit(2);

    let first_page = store.query(&base).await.unwrap();
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[1].id, "p4"); // Lamp

    let second_page = store
        .query(&base.clone().start_after(Cursor(first_page[1].id.clone())))
        .await
        .unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].id, "p1"); // Vase

    // Cursor pointing at a vanished document is an explicit error,
    // not a silent restart from the top.
    let err = store
        .query(&base.start_after(Cursor("gone".to_string())))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::CursorInvalid(_)));
}

#[tokio::test]
async fn missing_collection_queries_empty() {
    let store = MemoryStore::new();
    let docs = store.query(&Query::collection("nothing")).await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn partial_update_merges_fields() {
    let store = seeded_store();

    let doc = store
        .update("products", "p1", fields(json!({"price": 24.9})))
        .await
        .unwrap();

    assert_eq!(doc.get("price").unwrap().as_f64(), Some(24.9));
    // Untouched fields survive the merge
    assert_eq!(doc.get("name").unwrap().as_str(), Some("Vase"));
}

#[tokio::test]
async fn batch_applies_atomically() {
    let store = seeded_store();

    let batch = WriteBatch::new()
        .delete("products", "p1")
        .delete("products", "p2");
    store.commit(batch).await.unwrap();

    assert_eq!(store.len("products"), 2);
    assert_eq!(store.committed_batches().len(), 1);
}

#[tokio::test]
async fn rejected_batch_applies_nothing() {
    let store = seeded_store();

    let batch = WriteBatch::new()
        .delete("products", "p1")
        .delete("products", "missing");
    let err = store.commit(batch).await.unwrap_err();

    assert!(matches!(err, StoreError::BatchRejected(_)));
    // p1 must still be there: the batch failed as a unit
    assert!(store.get("products", "p1").await.unwrap().is_some());
    assert!(store.committed_batches().is_empty());
}
