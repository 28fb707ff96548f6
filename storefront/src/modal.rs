//! Modal Module
//!
//! Explicit lifecycle for the product detail modal:
//!
//! ```text
//! Closed -> Opening -> Open -> Closing -> Closed
//! ```
//!
//! Opening captures the page context (scroll offset, focused element) so
//! closing can restore both; the close transition is gated by a one-shot
//! completion signal that fires exactly once per close. The zoom
//! sub-state is orthogonal and resets on close or image change.

use shared::models::Product;
use shared::util::format_price;

use crate::zoom::ZoomState;

/// Element id of the modal's close control; receives focus when the
/// modal finishes opening
pub const CLOSE_CONTROL: &str = "modal-close";

/// Modal lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// What triggered a close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    Backdrop,
    Escape,
    ViewInStore,
}

/// Page context captured when the modal opens
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageContext {
    /// Vertical scroll offset, neutralized while the modal is up
    pub scroll_y: f64,
    /// Identifier of the previously focused element
    pub focused: Option<String>,
}

/// Context handed back when the close transition completes
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredContext {
    pub scroll_y: f64,
    pub focused: Option<String>,
}

/// Content the modal displays, resolved from the product at open time
#[derive(Debug, Clone, PartialEq)]
pub struct ModalContent {
    pub product_id: String,
    pub title: String,
    pub price_label: String,
    pub description: String,
    pub gallery: Vec<String>,
    pub link: String,
}

/// Modal state machine
#[derive(Debug, Default)]
pub struct ModalState {
    phase: ModalPhase,
    content: Option<ModalContent>,
    gallery_index: usize,
    saved_scroll: f64,
    saved_focus: Option<String>,
    /// Armed on close; consumed by the one-shot transition signal
    close_pending: bool,
    pub zoom: ZoomState,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn content(&self) -> Option<&ModalContent> {
        self.content.as_ref()
    }

    /// Index of the gallery image currently shown
    pub fn gallery_index(&self) -> usize {
        self.gallery_index
    }

    /// `Closed -> Opening`.
    ///
    /// A no-op unless the modal is closed and the product id resolves in
    /// the in-memory list. Captures the page context for restoration.
    pub fn open(&mut self, products: &[Product], product_id: &str, page: &PageContext) -> bool {
        if self.phase != ModalPhase::Closed {
            return false;
        }
        let Some(product) = products.iter().find(|p| p.id == product_id) else {
            tracing::debug!(product_id = %product_id, "Modal open ignored: unknown product");
            return false;
        };

        self.content = Some(ModalContent {
            product_id: product.id.clone(),
            title: product.name.clone(),
            price_label: format_price(product.price),
            description: product.description.clone(),
            gallery: product.gallery().iter().map(|s| s.to_string()).collect(),
            link: product.link.clone(),
        });
        self.gallery_index = 0;
        self.saved_scroll = page.scroll_y;
        self.saved_focus = page.focused.clone();
        self.zoom.reset();
        self.phase = ModalPhase::Opening;

        tracing::debug!(product_id = %product_id, "Modal opening");
        true
    }

    /// `Opening -> Open`, after the entry animation frame. Focus moves
    /// to [`CLOSE_CONTROL`].
    pub fn finish_opening(&mut self) -> bool {
        if self.phase != ModalPhase::Opening {
            return false;
        }
        self.phase = ModalPhase::Open;
        true
    }

    /// `Open -> Closing`. Resets zoom first and arms the one-shot
    /// transition signal.
    pub fn request_close(&mut self, reason: CloseReason) -> bool {
        if self.phase != ModalPhase::Open {
            return false;
        }
        self.zoom.reset();
        self.phase = ModalPhase::Closing;
        self.close_pending = true;
        tracing::debug!(?reason, "Modal closing");
        true
    }

    /// `Closing -> Closed`, driven by the transition-complete signal.
    ///
    /// Fires exactly once per close: the first call returns the saved
    /// page context, any further call is `None`.
    pub fn on_transition_end(&mut self) -> Option<RestoredContext> {
        if self.phase != ModalPhase::Closing || !self.close_pending {
            return None;
        }
        self.close_pending = false;
        self.phase = ModalPhase::Closed;

        let restored = RestoredContext {
            scroll_y: self.saved_scroll,
            focused: self.saved_focus.take(),
        };
        self.content = None;
        self.gallery_index = 0;
        self.saved_scroll = 0.0;

        tracing::debug!("Modal closed, page context restored");
        Some(restored)
    }

    /// Switch the displayed gallery image; resets zoom. Out-of-range
    /// indexes are ignored.
    pub fn select_image(&mut self, index: usize) -> bool {
        if self.phase != ModalPhase::Open {
            return false;
        }
        let Some(content) = &self.content else {
            return false;
        };
        if index >= content.gallery.len() {
            return false;
        }
        self.gallery_index = index;
        self.zoom.reset();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn products() -> Vec<Product> {
        vec![Product {
            id: "p1".to_string(),
            name: "Vase".to_string(),
            category: "decor".to_string(),
            price: Decimal::new(199, 1),
            description: "Hand made".to_string(),
            link: "https://shop.example/vase".to_string(),
            image: "vase.jpg".to_string(),
            images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            active: true,
        }]
    }

    fn page() -> PageContext {
        PageContext {
            scroll_y: 420.0,
            focused: Some("card-p1".to_string()),
        }
    }

    #[test]
    fn test_full_lifecycle_restores_context() {
        let mut modal = ModalState::new();

        assert!(modal.open(&products(), "p1", &page()));
        assert_eq!(modal.phase(), ModalPhase::Opening);
        let content = modal.content().unwrap();
        assert_eq!(content.title, "Vase");
        assert_eq!(content.price_label, "19.90");
        assert_eq!(content.gallery, vec!["a.jpg", "b.jpg"]);

        assert!(modal.finish_opening());
        assert_eq!(modal.phase(), ModalPhase::Open);

        assert!(modal.request_close(CloseReason::Escape));
        assert_eq!(modal.phase(), ModalPhase::Closing);

        let restored = modal.on_transition_end().unwrap();
        assert_eq!(restored.scroll_y, 420.0);
        assert_eq!(restored.focused.as_deref(), Some("card-p1"));
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert!(modal.content().is_none());
    }

    #[test]
    fn test_open_unknown_id_is_noop() {
        let mut modal = ModalState::new();
        assert!(!modal.open(&products(), "missing", &page()));
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert!(modal.content().is_none());
    }

    #[test]
    fn test_transition_end_fires_once() {
        let mut modal = ModalState::new();
        modal.open(&products(), "p1", &page());
        modal.finish_opening();
        modal.request_close(CloseReason::CloseButton);

        assert!(modal.on_transition_end().is_some());
        assert!(modal.on_transition_end().is_none());
    }

    #[test]
    fn test_transition_end_ignored_while_open() {
        let mut modal = ModalState::new();
        modal.open(&products(), "p1", &page());
        modal.finish_opening();
        assert!(modal.on_transition_end().is_none());
        assert_eq!(modal.phase(), ModalPhase::Open);
    }

    #[test]
    fn test_close_resets_zoom() {
        let mut modal = ModalState::new();
        modal.open(&products(), "p1", &page());
        modal.finish_opening();

        modal.zoom.toggle_pointer(
            crate::zoom::Point { x: 10.0, y: 10.0 },
            crate::zoom::Size {
                width: 800.0,
                height: 600.0,
            },
            1024.0,
        );
        assert_eq!(modal.zoom.mode, crate::zoom::ZoomMode::Zoomed);

        modal.request_close(CloseReason::Backdrop);
        assert_eq!(modal.zoom.mode, crate::zoom::ZoomMode::Idle);
    }

    #[test]
    fn test_image_change_resets_zoom() {
        let mut modal = ModalState::new();
        modal.open(&products(), "p1", &page());
        modal.finish_opening();

        modal.zoom.toggle_pointer(
            crate::zoom::Point { x: 10.0, y: 10.0 },
            crate::zoom::Size {
                width: 800.0,
                height: 600.0,
            },
            1024.0,
        );

        assert!(modal.select_image(1));
        assert_eq!(modal.gallery_index(), 1);
        assert_eq!(modal.zoom.mode, crate::zoom::ZoomMode::Idle);

        // Out of range: ignored
        assert!(!modal.select_image(5));
        assert_eq!(modal.gallery_index(), 1);
    }

    #[test]
    fn test_double_open_is_noop() {
        let mut modal = ModalState::new();
        assert!(modal.open(&products(), "p1", &page()));
        assert!(!modal.open(&products(), "p1", &page()));
    }
}
