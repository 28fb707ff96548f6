//! App Orchestrator
//!
//! Owns the catalog state and sequences initialization: collect view
//! regions, load categories, load products (cache first), wire events,
//! start the slideshow. Background cache revalidation runs after the
//! initial render and never delays first paint.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared::models::Product;
use tokio::task::JoinHandle;
use vitrine_store::DocumentStore;

use crate::cache::ProductCache;
use crate::categories;
use crate::events::{CategoryBarState, EventRouter, StorefrontHooks, UiEvent};
use crate::modal::{CLOSE_CONTROL, CloseReason, ModalPhase, ModalState, PageContext};
use crate::products::{self, ProductQuery, SearchMode};
use crate::state::{CatalogState, CategoryFilter};
use crate::view::{self, RegionSource, ViewRegions};
use crate::zoom::{Point, Size};

/// Storefront configuration
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | VITRINE_DATA_DIR | .vitrine | Cache directory |
/// | VITRINE_PAGE_SIZE | 12 | Products per fetched page |
/// | VITRINE_FADE_MS | 220 | Grid fade transition duration |
/// | VITRINE_SLIDESHOW_MS | 5000 | Slideshow tick interval |
/// | VITRINE_SEARCH_MODE | compose | compose \| override |
/// | VITRINE_VIEWPORT_WIDTH | 1280 | Viewport width for zoom scaling |
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the persisted product cache
    pub data_dir: PathBuf,
    /// Page size for cursor pagination
    pub page_size: usize,
    /// Fade transition duration (milliseconds); 0 disables transitions
    pub fade_ms: u64,
    /// Slideshow advance interval (milliseconds)
    pub slideshow_interval_ms: u64,
    /// How search interacts with the category filter
    pub search_mode: SearchMode,
    /// Viewport width, drives the reduced zoom factor on narrow screens
    pub viewport_width: f64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("VITRINE_DATA_DIR")
                .unwrap_or_else(|_| ".vitrine".into())
                .into(),
            page_size: std::env::var("VITRINE_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
            fade_ms: std::env::var("VITRINE_FADE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(220),
            slideshow_interval_ms: std::env::var("VITRINE_SLIDESHOW_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            search_mode: match std::env::var("VITRINE_SEARCH_MODE").as_deref() {
                Ok("override") => SearchMode::Override,
                _ => SearchMode::Compose,
            },
            viewport_width: std::env::var("VITRINE_VIEWPORT_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1280.0),
        }
    }

    /// Configuration with a custom data directory and page size,
    /// transitions disabled. Used by tests and demos.
    pub fn with_overrides(data_dir: impl Into<PathBuf>, page_size: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            page_size,
            fade_ms: 0,
            slideshow_interval_ms: 5000,
            search_mode: SearchMode::Compose,
            viewport_width: 1280.0,
        }
    }
}

struct AppInner<S: DocumentStore> {
    config: AppConfig,
    store: Arc<S>,
    cache: ProductCache,
    state: RwLock<CatalogState>,
    view: RwLock<ViewRegions>,
    modal: RwLock<ModalState>,
    /// Live page context maintained by the shell (scroll, focus)
    page: RwLock<PageContext>,
    /// At most one in-flight page fetch; a second trigger is dropped
    loading_more: AtomicBool,
    slideshow_index: AtomicUsize,
}

// Lock order throughout: state -> modal -> view. Never hold a later
// lock while taking an earlier one.
impl<S: DocumentStore + 'static> AppInner<S> {
    fn render_grid(&self, visible: &[Product]) {
        let mut view = self.view.write();
        if visible.is_empty() {
            view.product_grid
                .mount(view::empty_results().into_string(), Vec::new());
        } else {
            let ids = visible.iter().map(|p| p.id.clone()).collect();
            view.product_grid
                .mount(view::product_grid(visible).into_string(), ids);
        }
        view.product_grid.active = true;
    }

    /// Re-render the grid with the two-phase transition: fade-out runs
    /// to completion before anything is cleared and faded back in.
    async fn reload_grid(&self) {
        let had_cards = !self.view.read().product_grid.card_ids.is_empty();
        if had_cards && self.config.fade_ms > 0 {
            self.view.write().product_grid.active = false;
            tokio::time::sleep(Duration::from_millis(self.config.fade_ms)).await;
        }

        let visible = {
            let state = self.state.read();
            products::visible_products(&state, self.config.search_mode)
        };
        self.render_grid(&visible);
    }

    fn render_category_bar(&self, active_slugs: &[String], all_active: bool) {
        let html = {
            let state = self.state.read();
            view::category_buttons(&state.categories, active_slugs, all_active).into_string()
        };
        self.view.write().category_bar.mount(html, Vec::new());
    }

    fn render_modal(&self) {
        let (html, open) = {
            let modal = self.modal.read();
            match modal.content() {
                Some(content) => (
                    view::modal_body(content, modal.gallery_index()).into_string(),
                    true,
                ),
                None => (String::new(), false),
            }
        };

        let mut view = self.view.write();
        if open {
            view.modal.mount(html, Vec::new());
            view.modal.active = true;
        } else {
            view.modal.clear();
        }
    }

    /// Serialized by the `loading_more` guard: a second trigger while a
    /// fetch is in flight is a silent no-op, not queued.
    async fn load_more(&self) {
        if self.loading_more.swap(true, Ordering::SeqCst) {
            tracing::debug!("Load-more ignored: fetch already in flight");
            return;
        }
        self.load_more_page().await;
        self.loading_more.store(false, Ordering::SeqCst);
    }

    async fn load_more_page(&self) {
        let (has_more, cursor) = {
            let state = self.state.read();
            (state.page.has_more, state.page.cursor.clone())
        };
        if !has_more {
            tracing::debug!("Load-more ignored: no further pages");
            return;
        }

        let query = ProductQuery {
            order_by_name: true,
            page_size: Some(self.config.page_size),
            cursor,
        };
        let page = match products::fetch_products(self.store.as_ref(), &query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(error = %e, "Load-more fetch failed");
                return;
            }
        };

        let fresh: Vec<Product> = {
            let mut state = self.state.write();
            let fresh = products::append_page(&mut state, page);
            // Only items passing the active filter/search reach the grid
            let term = state.search.clone();
            fresh
                .into_iter()
                .filter(|p| {
                    state.filter.matches(&p.category)
                        && (term.is_empty() || products::search_matches(p, &term))
                })
                .collect()
        };

        let mut view = self.view.write();
        let mut next_index = view.product_grid.card_ids.len();
        for product in &fresh {
            // De-duplicate against already-rendered cards
            if view.product_grid.card_ids.iter().any(|id| id == &product.id) {
                continue;
            }
            let card = view::product_card(product, next_index).into_string();
            view.product_grid.html.push_str(&card);
            view.product_grid.card_ids.push(product.id.clone());
            next_index += 1;
        }
    }

    /// Advance the hero slideshow one step
    fn advance_slideshow(&self) {
        let html = {
            let state = self.state.read();
            let slides: Vec<&Product> = state
                .products
                .iter()
                .filter(|p| p.primary_image().is_some())
                .take(5)
                .collect();
            if slides.is_empty() {
                return;
            }
            let index = self.slideshow_index.fetch_add(1, Ordering::SeqCst) % slides.len();
            let product = slides[index];
            view::picture(product.primary_image().unwrap_or_default(), &product.name)
                .into_string()
        };
        self.view.write().slideshow.mount(html, Vec::new());
    }

    /// Stale-while-revalidate: compare a fresh fetch against the
    /// in-memory list and refresh state + cache only when they differ.
    async fn revalidate(&self) {
        let query = ProductQuery {
            order_by_name: true,
            page_size: Some(self.config.page_size),
            cursor: None,
        };
        let page = match products::fetch_products(self.store.as_ref(), &query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(error = %e, "Cache revalidation fetch failed");
                return;
            }
        };

        let changed = self.state.read().products != page.products;
        if !changed {
            tracing::debug!("Product cache still fresh");
            return;
        }

        let snapshot = page.products.clone();
        {
            let mut state = self.state.write();
            products::replace_products(&mut state, page);
        }
        self.cache.set(&snapshot);
        self.reload_grid().await;
        tracing::info!(count = snapshot.len(), "Product cache revalidated");
    }
}

/// Hook implementation backing the default event wiring.
///
/// Cheap to clone; shares the app's state.
pub struct StorefrontHandle<S: DocumentStore + 'static> {
    inner: Arc<AppInner<S>>,
}

impl<S: DocumentStore + 'static> Clone for StorefrontHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl<S: DocumentStore + 'static> StorefrontHooks for StorefrontHandle<S> {
    async fn on_search(&self, term: &str) {
        {
            let mut state = self.inner.state.write();
            products::apply_search(&mut state, term);
        }
        self.inner.view.write().search_input.html = term.trim().to_string();
        self.inner.reload_grid().await;
    }

    async fn on_category_change(&self, filter: CategoryFilter) {
        let (active_slugs, all_active) = match &filter {
            CategoryFilter::All => (Vec::new(), true),
            CategoryFilter::One(slug) => (vec![slug.clone()], false),
            CategoryFilter::Many(slugs) => (slugs.clone(), false),
        };
        {
            let mut state = self.inner.state.write();
            products::apply_category_filter(&mut state, filter);
        }
        self.inner.render_category_bar(&active_slugs, all_active);
        self.inner.reload_grid().await;
    }

    async fn on_clear_filters(&self) {
        // Category selection and search text reset together
        {
            let mut state = self.inner.state.write();
            products::apply_category_filter(&mut state, CategoryFilter::All);
            products::apply_search(&mut state, "");
        }
        self.inner.view.write().search_input.html.clear();
        self.inner.render_category_bar(&[], true);
        self.inner.reload_grid().await;
    }

    async fn on_category_focus(&self, button: &str) {
        self.inner.view.write().category_bar.focused = Some(button.to_string());
    }

    async fn on_open_modal(&self, product_id: &str) {
        let page = self.inner.page.read().clone();
        let opened = {
            let state = self.inner.state.read();
            let mut modal = self.inner.modal.write();
            modal.open(&state.products, product_id, &page)
        };
        if !opened {
            return;
        }

        // Neutralize the page scroll while the modal is up
        {
            let mut page = self.inner.page.write();
            page.scroll_y = 0.0;
            page.focused = None;
        }
        self.inner.render_modal();

        // Entry frame complete: focus lands on the close control
        self.inner.modal.write().finish_opening();
        let mut page = self.inner.page.write();
        page.focused = Some(CLOSE_CONTROL.to_string());
        drop(page);
        self.inner.view.write().modal.focused = Some(CLOSE_CONTROL.to_string());
    }

    async fn on_close_modal(&self, reason: CloseReason) {
        if !self.inner.modal.write().request_close(reason) {
            return;
        }

        // Exit transition, then the one-shot completion signal
        if self.inner.config.fade_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.inner.config.fade_ms)).await;
        }
        let restored = self.inner.modal.write().on_transition_end();
        if let Some(restored) = restored {
            let mut page = self.inner.page.write();
            page.scroll_y = restored.scroll_y;
            page.focused = restored.focused;
        }
        self.inner.render_modal();
    }

    async fn on_select_image(&self, index: usize) {
        if self.inner.modal.write().select_image(index) {
            self.inner.render_modal();
        }
    }

    async fn on_toggle_zoom(&self, pointer: Point, container: Size) {
        let mut modal = self.inner.modal.write();
        if modal.phase() == ModalPhase::Open {
            modal
                .zoom
                .toggle_pointer(pointer, container, self.inner.config.viewport_width);
        }
    }

    async fn on_load_more(&self) {
        self.inner.load_more().await;
    }

    async fn on_pinch_start(&self, distance: f64) {
        let mut modal = self.inner.modal.write();
        if modal.phase() == ModalPhase::Open {
            modal.zoom.pinch_start(distance);
        }
    }

    async fn on_pinch_move(&self, distance: f64, midpoint: Point, container: Size) {
        let mut modal = self.inner.modal.write();
        if modal.phase() == ModalPhase::Open {
            modal.zoom.pinch_move(distance, midpoint, container);
        }
    }

    async fn on_pinch_end(&self) {
        self.inner.modal.write().zoom.pinch_end();
    }
}

/// The storefront application
pub struct StorefrontApp<S: DocumentStore + 'static> {
    inner: Arc<AppInner<S>>,
    router: EventRouter<StorefrontHandle<S>>,
    tasks: Vec<JoinHandle<()>>,
}

impl<S: DocumentStore + 'static> std::fmt::Debug for StorefrontApp<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontApp")
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

impl<S: DocumentStore + 'static> StorefrontApp<S> {
    /// Initialize the storefront.
    ///
    /// Sequence: collect view regions (fail fast) -> load categories ->
    /// load products (cache first, remote otherwise) -> wire events ->
    /// start the slideshow. A failed initial fetch with no cache renders
    /// the inline failure state; the app still comes up.
    pub async fn init(
        config: AppConfig,
        store: Arc<S>,
        shell: &dyn RegionSource,
    ) -> anyhow::Result<Self> {
        // 1. Collect every region the app needs, or fail fast
        let regions = ViewRegions::collect(shell)?;

        let cache = ProductCache::new(&config.data_dir);
        let inner = Arc::new(AppInner {
            config,
            store,
            cache,
            state: RwLock::new(CatalogState::new()),
            view: RwLock::new(regions),
            modal: RwLock::new(ModalState::new()),
            page: RwLock::new(PageContext::default()),
            loading_more: AtomicBool::new(false),
            slideshow_index: AtomicUsize::new(0),
        });

        // 2. Categories (failure degrades to an unfiltered grid)
        let categories = categories::load_categories(inner.store.as_ref()).await;
        let slugs: Vec<String> = categories.iter().map(|c| c.slug.clone()).collect();
        inner.state.write().categories = categories;
        inner.render_category_bar(&[], true);

        // 3. Products: cache first, then remote
        let mut serve_stale = false;
        match inner.cache.get() {
            Some(products) => {
                tracing::info!(count = products.len(), "Serving products from cache");
                let page_size = inner.config.page_size;
                {
                    let mut state = inner.state.write();
                    state.page.cursor = products.last().map(|p| vitrine_store::Cursor(p.id.clone()));
                    state.page.has_more = products.len() == page_size;
                    state.products = products;
                }
                inner.reload_grid().await;
                serve_stale = true;
            }
            None => {
                let query = ProductQuery {
                    order_by_name: true,
                    page_size: Some(inner.config.page_size),
                    cursor: None,
                };
                match products::fetch_products(inner.store.as_ref(), &query).await {
                    Ok(page) => {
                        inner.cache.set(&page.products);
                        {
                            let mut state = inner.state.write();
                            products::replace_products(&mut state, page);
                        }
                        inner.reload_grid().await;
                    }
                    Err(e) => {
                        // No safe fallback left: surface the failure state
                        tracing::error!(error = %e, "Initial product fetch failed with no cache");
                        let mut view = inner.view.write();
                        view.product_grid
                            .mount(view::load_error().into_string(), Vec::new());
                        view.product_grid.active = true;
                    }
                }
            }
        }

        // 4. Wire events
        let router = EventRouter::new(
            StorefrontHandle {
                inner: inner.clone(),
            },
            slugs,
        );

        // 5. Slideshow tick
        let mut tasks = Vec::new();
        tasks.push(Self::spawn_slideshow(inner.clone()));

        // Background revalidation only when the paint came from cache
        if serve_stale {
            let revalidate_inner = inner.clone();
            tasks.push(tokio::spawn(async move {
                revalidate_inner.revalidate().await;
            }));
        }

        tracing::info!("Storefront initialized");
        Ok(Self {
            inner,
            router,
            tasks,
        })
    }

    fn spawn_slideshow(inner: Arc<AppInner<S>>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_millis(inner.config.slideshow_interval_ms));
            interval.tick().await; // immediate first tick
            loop {
                interval.tick().await;
                inner.advance_slideshow();
            }
        })
    }

    /// Feed a UI event through the delegated wiring
    pub async fn dispatch(&self, event: UiEvent) {
        self.router.dispatch(event).await;
    }

    /// Category bar selection state
    pub fn category_bar(&self) -> &Mutex<CategoryBarState> {
        self.router.category_bar()
    }

    /// Update the live page context (shell reports scroll/focus)
    pub fn set_page_context(&self, scroll_y: f64, focused: Option<String>) {
        let mut page = self.inner.page.write();
        page.scroll_y = scroll_y;
        page.focused = focused;
    }

    /// Current page context (scroll offset, focused element)
    pub fn page_context(&self) -> PageContext {
        self.inner.page.read().clone()
    }

    /// Products the grid currently displays (filtered copy)
    pub fn visible_products(&self) -> Vec<Product> {
        let state = self.inner.state.read();
        products::visible_products(&state, self.inner.config.search_mode)
    }

    /// Mounted grid fragment
    pub fn grid_html(&self) -> String {
        self.inner.view.read().product_grid.html.clone()
    }

    /// Ids of the cards currently rendered into the grid
    pub fn grid_card_ids(&self) -> Vec<String> {
        self.inner.view.read().product_grid.card_ids.clone()
    }

    /// Mounted category bar fragment
    pub fn category_bar_html(&self) -> String {
        self.inner.view.read().category_bar.html.clone()
    }

    /// Mounted modal fragment (empty while closed)
    pub fn modal_html(&self) -> String {
        self.inner.view.read().modal.html.clone()
    }

    /// Mounted slideshow fragment
    pub fn slideshow_html(&self) -> String {
        self.inner.view.read().slideshow.html.clone()
    }

    /// Current modal lifecycle phase
    pub fn modal_phase(&self) -> ModalPhase {
        self.inner.modal.read().phase()
    }

    /// Current zoom transform of the modal image
    pub fn zoom_transform(&self) -> crate::zoom::Transform {
        self.inner.modal.read().zoom.transform
    }

    /// Whether another product page may exist
    pub fn has_more(&self) -> bool {
        self.inner.state.read().page.has_more
    }

    /// Advance the hero slideshow one step (the background task does
    /// this on its own tick)
    pub fn advance_slideshow(&self) {
        self.inner.advance_slideshow();
    }

    /// Force a cache revalidation pass now
    pub async fn revalidate(&self) {
        self.inner.revalidate().await;
    }

    /// Tear the app down: stop background tasks and drop state
    pub fn teardown(self) {
        for task in &self.tasks {
            task.abort();
        }
        tracing::info!("Storefront torn down");
    }
}
