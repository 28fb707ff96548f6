//! Storefront demo against the in-memory store.
//! Run: cargo run -p storefront --example storefront_demo

use std::sync::Arc;

use serde_json::json;
use storefront::events::{CategoryBarEvent, GridEvent, NavEvent};
use storefront::view::StaticRegionSource;
use storefront::{AppConfig, StorefrontApp, UiEvent};
use vitrine_store::{Fields, MemoryStore};

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront::logger::init_logger();

    let store = MemoryStore::new();
    store.insert_with_id(
        "categories",
        "c1",
        fields(json!({"name": "Decor", "slug": "decor"})),
    );
    store.insert_with_id(
        "categories",
        "c2",
        fields(json!({"name": "Kitchen", "slug": "kitchen"})),
    );
    for (id, name, category, price) in [
        ("p1", "Ceramic Vase", "decor", 19.9),
        ("p2", "Stoneware Mug", "kitchen", 9.5),
        ("p3", "Brass Lamp", "decor", 45.0),
    ] {
        store.insert_with_id(
            "products",
            id,
            fields(json!({
                "name": name,
                "category": category,
                "price": price,
                "image": format!("{}.jpg", id),
                "active": true,
            })),
        );
    }

    let config = AppConfig::from_env();
    let app = StorefrontApp::init(config, Arc::new(store), &StaticRegionSource::complete()).await?;

    println!("== initial grid ==\n{}\n", app.grid_html());

    app.dispatch(UiEvent::CategoryBar(CategoryBarEvent::Button {
        slug: "decor".to_string(),
    }))
    .await;
    println!(
        "== decor filter: {} products visible ==",
        app.visible_products().len()
    );

    app.dispatch(UiEvent::Nav(NavEvent::SearchChanged {
        term: "lamp".to_string(),
    }))
    .await;
    println!(
        "== search 'lamp' within decor: {} visible ==",
        app.visible_products().len()
    );

    app.dispatch(UiEvent::CategoryBar(CategoryBarEvent::Clear)).await;
    app.dispatch(UiEvent::Grid(GridEvent::CardClicked {
        product_id: "p1".to_string(),
    }))
    .await;
    println!("== modal ==\n{}", app.modal_html());

    app.teardown();
    Ok(())
}
