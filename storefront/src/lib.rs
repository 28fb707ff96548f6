//! Vitrine Storefront - public catalog state engine
//!
//! Client-side state for the public storefront: the versioned product
//! cache, in-memory filtering and search, cursor pagination, the detail
//! modal state machine with pan/pinch zoom, fragment rendering, and the
//! event wiring that connects them. Persistence lives behind the
//! [`vitrine_store::DocumentStore`] contract; this crate never talks to
//! the managed backend directly.

pub mod app;
pub mod cache;
pub mod categories;
pub mod events;
pub mod logger;
pub mod modal;
pub mod products;
pub mod state;
pub mod view;
pub mod zoom;

pub use app::{AppConfig, StorefrontApp, StorefrontHandle};
pub use cache::{CACHE_DURATION_MS, ProductCache};
pub use events::{CategoryBarState, EventRouter, StorefrontHooks, UiEvent};
pub use modal::{CloseReason, ModalPhase, ModalState, PageContext};
pub use products::SearchMode;
pub use state::{CatalogState, CategoryFilter};
pub use zoom::{Point, Size, Transform, ZoomMode, ZoomState};
