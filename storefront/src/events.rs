//! Event Wiring Module
//!
//! One delegated dispatch entry per logical region (grid, category bar,
//! modal, nav, footer) feeding a hooks trait with one method per
//! callback. Any UI shell can rebind the hooks; the storefront app is
//! just the default implementation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::modal::CloseReason;
use crate::state::CategoryFilter;
use crate::zoom::{Point, Size};

/// Callback surface the event wiring drives
#[async_trait]
pub trait StorefrontHooks: Send + Sync {
    async fn on_search(&self, term: &str);
    async fn on_category_change(&self, filter: CategoryFilter);
    /// Reset category selection and search text atomically
    async fn on_clear_filters(&self);
    /// Move real focus to a category button (keyboard navigation)
    async fn on_category_focus(&self, button: &str);
    async fn on_open_modal(&self, product_id: &str);
    async fn on_close_modal(&self, reason: CloseReason);
    async fn on_select_image(&self, index: usize);
    async fn on_toggle_zoom(&self, pointer: Point, container: Size);
    async fn on_load_more(&self);
    async fn on_pinch_start(&self, distance: f64);
    async fn on_pinch_move(&self, distance: f64, midpoint: Point, container: Size);
    async fn on_pinch_end(&self);
}

/// Events from the product grid region
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    CardClicked { product_id: String },
    LoadMore,
}

/// Events from the category bar region
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryBarEvent {
    /// A dynamic category button
    Button { slug: String },
    /// The fixed "all" toggle
    All,
    /// The fixed "clear filters" control
    Clear,
    /// Arrow-key navigation (true = forward)
    Arrow { forward: bool },
}

/// Events from the modal region
#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent {
    CloseClicked,
    BackdropClicked,
    EscapePressed,
    ViewInStore,
    ThumbnailClicked { index: usize },
    ZoomToggled { pointer: Point, container: Size },
    PinchStarted { distance: f64 },
    PinchMoved { distance: f64, midpoint: Point, container: Size },
    PinchEnded,
}

/// Events from the nav region
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    SearchChanged { term: String },
}

/// Events from the footer region
#[derive(Debug, Clone, PartialEq)]
pub enum FooterEvent {
    LinkClicked { href: String },
}

/// A UI event, tagged by originating region
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Grid(GridEvent),
    CategoryBar(CategoryBarEvent),
    Modal(ModalEvent),
    Nav(NavEvent),
    Footer(FooterEvent),
}

/// Fixed button keys in the category bar
const ALL_BUTTON: &str = "all";
const CLEAR_BUTTON: &str = "clear";

/// Selection and focus state of the category bar.
///
/// The "all" toggle switches every category button as a group; the
/// dynamic buttons multi-select independently while deactivating "all".
/// With nothing selected the grid is unfiltered either way.
#[derive(Debug, Default)]
pub struct CategoryBarState {
    slugs: Vec<String>,
    active: BTreeSet<String>,
    all_active: bool,
    focus_index: usize,
}

impl CategoryBarState {
    pub fn new(slugs: Vec<String>) -> Self {
        Self {
            slugs,
            active: BTreeSet::new(),
            all_active: true,
            focus_index: 0,
        }
    }

    /// Replace the dynamic buttons (after a category load); selections
    /// referencing vanished slugs are pruned.
    pub fn set_slugs(&mut self, slugs: Vec<String>) {
        self.active.retain(|s| slugs.contains(s));
        self.slugs = slugs;
        if self.active.is_empty() {
            self.all_active = true;
        }
        self.focus_index = 0;
    }

    /// Toggle the "all" group control
    pub fn click_all(&mut self) -> CategoryFilter {
        self.all_active = !self.all_active;
        self.active.clear();
        self.filter()
    }

    /// Toggle one category's membership in the selection
    pub fn click(&mut self, slug: &str) -> CategoryFilter {
        if !self.active.remove(slug) {
            self.active.insert(slug.to_string());
        }
        self.all_active = self.active.is_empty();
        self.filter()
    }

    /// Reset to the unfiltered state
    pub fn clear(&mut self) -> CategoryFilter {
        self.active.clear();
        self.all_active = true;
        self.filter()
    }

    /// Move focus cyclically across all buttons (fixed ones included),
    /// returning the key of the newly focused button
    pub fn focus_step(&mut self, forward: bool) -> String {
        let count = self.slugs.len() + 2;
        self.focus_index = if forward {
            (self.focus_index + 1) % count
        } else {
            (self.focus_index + count - 1) % count
        };
        self.focused_button()
    }

    /// Key of the currently focused button
    pub fn focused_button(&self) -> String {
        match self.focus_index {
            0 => ALL_BUTTON.to_string(),
            i if i <= self.slugs.len() => self.slugs[i - 1].clone(),
            _ => CLEAR_BUTTON.to_string(),
        }
    }

    /// Currently selected slugs, sorted
    pub fn active_slugs(&self) -> Vec<String> {
        self.active.iter().cloned().collect()
    }

    pub fn all_active(&self) -> bool {
        self.all_active
    }

    /// The category filter this selection represents
    pub fn filter(&self) -> CategoryFilter {
        if self.all_active || self.active.is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::from_slugs(self.active_slugs())
        }
    }
}

/// Routes region events into hook calls
pub struct EventRouter<H: StorefrontHooks> {
    hooks: H,
    category_bar: Mutex<CategoryBarState>,
}

impl<H: StorefrontHooks> EventRouter<H> {
    pub fn new(hooks: H, category_slugs: Vec<String>) -> Self {
        Self {
            hooks,
            category_bar: Mutex::new(CategoryBarState::new(category_slugs)),
        }
    }

    /// Category bar selection state (rendering reads the active set)
    pub fn category_bar(&self) -> &Mutex<CategoryBarState> {
        &self.category_bar
    }

    /// Delegated entry point; routes by region
    pub async fn dispatch(&self, event: UiEvent) {
        match event {
            UiEvent::Grid(e) => self.on_grid(e).await,
            UiEvent::CategoryBar(e) => self.on_category_bar(e).await,
            UiEvent::Modal(e) => self.on_modal(e).await,
            UiEvent::Nav(e) => self.on_nav(e).await,
            UiEvent::Footer(e) => self.on_footer(e).await,
        }
    }

    async fn on_grid(&self, event: GridEvent) {
        match event {
            GridEvent::CardClicked { product_id } => self.hooks.on_open_modal(&product_id).await,
            GridEvent::LoadMore => self.hooks.on_load_more().await,
        }
    }

    async fn on_category_bar(&self, event: CategoryBarEvent) {
        match event {
            CategoryBarEvent::All => {
                let filter = self.category_bar.lock().click_all();
                self.hooks.on_category_change(filter).await;
            }
            CategoryBarEvent::Button { slug } => {
                let filter = self.category_bar.lock().click(&slug);
                self.hooks.on_category_change(filter).await;
            }
            CategoryBarEvent::Clear => {
                self.category_bar.lock().clear();
                self.hooks.on_clear_filters().await;
            }
            CategoryBarEvent::Arrow { forward } => {
                let button = self.category_bar.lock().focus_step(forward);
                self.hooks.on_category_focus(&button).await;
            }
        }
    }

    async fn on_modal(&self, event: ModalEvent) {
        match event {
            ModalEvent::CloseClicked => self.hooks.on_close_modal(CloseReason::CloseButton).await,
            ModalEvent::BackdropClicked => self.hooks.on_close_modal(CloseReason::Backdrop).await,
            ModalEvent::EscapePressed => self.hooks.on_close_modal(CloseReason::Escape).await,
            ModalEvent::ViewInStore => self.hooks.on_close_modal(CloseReason::ViewInStore).await,
            ModalEvent::ThumbnailClicked { index } => self.hooks.on_select_image(index).await,
            ModalEvent::ZoomToggled { pointer, container } => {
                self.hooks.on_toggle_zoom(pointer, container).await
            }
            ModalEvent::PinchStarted { distance } => self.hooks.on_pinch_start(distance).await,
            ModalEvent::PinchMoved {
                distance,
                midpoint,
                container,
            } => self.hooks.on_pinch_move(distance, midpoint, container).await,
            ModalEvent::PinchEnded => self.hooks.on_pinch_end().await,
        }
    }

    async fn on_nav(&self, event: NavEvent) {
        match event {
            NavEvent::SearchChanged { term } => self.hooks.on_search(&term).await,
        }
    }

    async fn on_footer(&self, event: FooterEvent) {
        match event {
            FooterEvent::LinkClicked { href } => {
                tracing::debug!(href = %href, "Footer link followed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> CategoryBarState {
        CategoryBarState::new(vec!["decor".to_string(), "kitchen".to_string()])
    }

    #[test]
    fn test_initial_state_is_all() {
        let bar = bar();
        assert!(bar.all_active());
        assert_eq!(bar.filter(), CategoryFilter::All);
    }

    #[test]
    fn test_multi_select_deactivates_all() {
        let mut bar = bar();
        assert_eq!(
            bar.click("decor"),
            CategoryFilter::One("decor".to_string())
        );
        assert!(!bar.all_active());

        let filter = bar.click("kitchen");
        assert!(matches!(filter, CategoryFilter::Many(ref slugs) if slugs.len() == 2));
    }

    #[test]
    fn test_unselecting_last_restores_all() {
        let mut bar = bar();
        bar.click("decor");
        let filter = bar.click("decor");
        assert_eq!(filter, CategoryFilter::All);
        assert!(bar.all_active());
    }

    #[test]
    fn test_all_toggle_clears_selection() {
        let mut bar = bar();
        bar.click("decor");
        bar.click("kitchen");

        let filter = bar.click_all();
        assert_eq!(filter, CategoryFilter::All);
        assert!(bar.active_slugs().is_empty());
    }

    #[test]
    fn test_clear_resets_selection() {
        let mut bar = bar();
        bar.click("decor");
        assert_eq!(bar.clear(), CategoryFilter::All);
        assert!(bar.all_active());
    }

    #[test]
    fn test_arrow_focus_is_cyclic() {
        let mut bar = bar();
        assert_eq!(bar.focused_button(), "all");
        assert_eq!(bar.focus_step(true), "decor");
        assert_eq!(bar.focus_step(true), "kitchen");
        assert_eq!(bar.focus_step(true), "clear");
        assert_eq!(bar.focus_step(true), "all");
        assert_eq!(bar.focus_step(false), "clear");
    }

    #[test]
    fn test_set_slugs_prunes_selection() {
        let mut bar = bar();
        bar.click("decor");
        bar.set_slugs(vec!["kitchen".to_string()]);
        assert!(bar.active_slugs().is_empty());
        assert!(bar.all_active());
    }
}
