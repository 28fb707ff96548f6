//! View regions
//!
//! Typed replacement for ad-hoc DOM queries: every handle the app needs
//! is collected once at startup, and a missing required region fails
//! construction with a typed error instead of a null handle surfacing
//! later.

use std::collections::HashSet;

use thiserror::Error;

/// The logical page regions the storefront drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKey {
    ProductGrid,
    CategoryBar,
    SearchInput,
    Modal,
    Nav,
    Footer,
    Slideshow,
}

impl RegionKey {
    /// Every region the app requires at startup
    pub const ALL: [RegionKey; 7] = [
        RegionKey::ProductGrid,
        RegionKey::CategoryBar,
        RegionKey::SearchInput,
        RegionKey::Modal,
        RegionKey::Nav,
        RegionKey::Footer,
        RegionKey::Slideshow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKey::ProductGrid => "product-grid",
            RegionKey::CategoryBar => "category-bar",
            RegionKey::SearchInput => "search-input",
            RegionKey::Modal => "modal",
            RegionKey::Nav => "nav",
            RegionKey::Footer => "footer",
            RegionKey::Slideshow => "slideshow",
        }
    }
}

/// View construction error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    /// A required region is absent from the page shell
    #[error("Required view region missing: {0}")]
    MissingRegion(&'static str),
}

/// Where regions come from; the page shell implements this
pub trait RegionSource {
    fn has_region(&self, key: RegionKey) -> bool;
}

/// Region source with an explicit key set (tests and demos)
#[derive(Debug, Default)]
pub struct StaticRegionSource {
    keys: HashSet<RegionKey>,
}

impl StaticRegionSource {
    /// A shell exposing every region
    pub fn complete() -> Self {
        Self {
            keys: RegionKey::ALL.into_iter().collect(),
        }
    }

    /// Remove a region (to exercise the fail-fast path)
    pub fn without(mut self, key: RegionKey) -> Self {
        self.keys.remove(&key);
        self
    }
}

impl RegionSource for StaticRegionSource {
    fn has_region(&self, key: RegionKey) -> bool {
        self.keys.contains(&key)
    }
}

/// One mounted region: current fragment plus the card ids rendered into
/// it (the de-duplication boundary for pagination)
#[derive(Debug, Clone, Default)]
pub struct RegionSlot {
    pub key: &'static str,
    /// Rendered fragment currently mounted in this region
    pub html: String,
    /// Product ids of the cards currently rendered (grid only)
    pub card_ids: Vec<String>,
    /// Visibility/activity marker (modal open, grid faded out, ...)
    pub active: bool,
    /// Element id currently holding focus within this region
    pub focused: Option<String>,
}

impl RegionSlot {
    fn new(key: RegionKey) -> Self {
        Self {
            key: key.as_str(),
            ..Self::default()
        }
    }

    /// Replace the mounted fragment
    pub fn mount(&mut self, html: String, card_ids: Vec<String>) {
        self.html = html;
        self.card_ids = card_ids;
    }

    pub fn clear(&mut self) {
        self.html.clear();
        self.card_ids.clear();
        self.active = false;
        self.focused = None;
    }
}

/// All region handles, collected once at startup
#[derive(Debug, Clone)]
pub struct ViewRegions {
    pub product_grid: RegionSlot,
    pub category_bar: RegionSlot,
    pub search_input: RegionSlot,
    pub modal: RegionSlot,
    pub nav: RegionSlot,
    pub footer: RegionSlot,
    pub slideshow: RegionSlot,
}

impl ViewRegions {
    /// Collect every required region, failing fast on the first absence
    pub fn collect(source: &dyn RegionSource) -> Result<Self, ViewError> {
        for key in RegionKey::ALL {
            if !source.has_region(key) {
                return Err(ViewError::MissingRegion(key.as_str()));
            }
        }

        Ok(Self {
            product_grid: RegionSlot::new(RegionKey::ProductGrid),
            category_bar: RegionSlot::new(RegionKey::CategoryBar),
            search_input: RegionSlot::new(RegionKey::SearchInput),
            modal: RegionSlot::new(RegionKey::Modal),
            nav: RegionSlot::new(RegionKey::Nav),
            footer: RegionSlot::new(RegionKey::Footer),
            slideshow: RegionSlot::new(RegionKey::Slideshow),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_complete_shell() {
        let regions = ViewRegions::collect(&StaticRegionSource::complete()).unwrap();
        assert_eq!(regions.product_grid.key, "product-grid");
        assert!(regions.product_grid.html.is_empty());
    }

    #[test]
    fn test_collect_fails_fast_on_missing_region() {
        let source = StaticRegionSource::complete().without(RegionKey::Modal);
        let err = ViewRegions::collect(&source).unwrap_err();
        assert_eq!(err, ViewError::MissingRegion("modal"));
    }

    #[test]
    fn test_mount_and_clear() {
        let mut slot = RegionSlot::new(RegionKey::ProductGrid);
        slot.mount("<div></div>".to_string(), vec!["p1".to_string()]);
        slot.active = true;

        slot.clear();
        assert!(slot.html.is_empty());
        assert!(slot.card_ids.is_empty());
        assert!(!slot.active);
    }
}
