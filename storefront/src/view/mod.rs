//! View model: typed region handles and fragment rendering

mod picture;
mod regions;
mod render;

pub use picture::{picture, webp_variant};
pub use regions::{RegionKey, RegionSlot, RegionSource, StaticRegionSource, ViewError, ViewRegions};
pub use render::{
    category_buttons, empty_results, load_error, modal_body, product_card, product_grid,
};
