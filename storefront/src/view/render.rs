//! Fragment rendering
//!
//! Pure functions from catalog state to markup. Nothing here mutates
//! application state; [`product_card`] is the unit boundary for render
//! tests.

use maud::{Markup, html};
use shared::models::{Category, Product};
use shared::util::format_price;

use super::picture::picture;
use crate::modal::{CLOSE_CONTROL, ModalContent};

/// Stagger step between card entry animations (milliseconds)
const CARD_STAGGER_MS: usize = 60;

/// Render one product card.
///
/// `index` drives the staggered fade-in delay; the card itself carries
/// its product id for delegated click handling.
pub fn product_card(product: &Product, index: usize) -> Markup {
    let delay = format!("animation-delay: {}ms", index * CARD_STAGGER_MS);
    html! {
        article.product-card data-product-id=(product.id) style=(delay) {
            @if let Some(url) = product.primary_image() {
                (picture(url, &product.name))
            }
            h3.product-name { (product.name) }
            p.product-price { (format_price(product.price)) }
            @if !product.description.is_empty() {
                p.product-description { (product.description) }
            }
            @if !product.link.is_empty() {
                a.product-link href=(product.link) target="_blank" rel="noopener" { "View in store" }
            }
        }
    }
}

/// Render the full product grid
pub fn product_grid(products: &[Product]) -> Markup {
    html! {
        @for (index, product) in products.iter().enumerate() {
            (product_card(product, index))
        }
    }
}

/// Explicit empty state instead of a blank grid
pub fn empty_results() -> Markup {
    html! {
        p.no-results { "No products match your selection." }
    }
}

/// Inline failure state for a fetch that had no cache to fall back on
pub fn load_error() -> Markup {
    html! {
        p.load-error { "Couldn't load products. Please try again later." }
    }
}

/// Render the category filter bar.
///
/// The fixed "all" and "clear filters" controls keep their positions;
/// everything between them is regenerated from the category list.
pub fn category_buttons(
    categories: &[Category],
    active_slugs: &[String],
    all_active: bool,
) -> Markup {
    html! {
        button.category-button.fixed data-filter="all" aria-pressed=(all_active.to_string()) { "All" }
        @for category in categories {
            @let pressed = active_slugs.iter().any(|s| s == &category.slug);
            button.category-button data-filter=(category.slug) aria-pressed=(pressed.to_string()) {
                (category.name)
            }
        }
        button.category-button.fixed data-filter="clear" { "Clear filters" }
    }
}

/// Render the modal body for a product
pub fn modal_body(content: &ModalContent, gallery_index: usize) -> Markup {
    let current = content.gallery.get(gallery_index).map(String::as_str);
    html! {
        button.modal-close id=(CLOSE_CONTROL) aria-label="Close" { "\u{00d7}" }
        div.modal-gallery {
            @if let Some(url) = current {
                (picture(url, &content.title))
            }
            @if content.gallery.len() > 1 {
                div.modal-thumbnails {
                    @for (index, url) in content.gallery.iter().enumerate() {
                        button.modal-thumbnail data-index=(index) aria-pressed=((index == gallery_index).to_string()) {
                            img src=(url) alt="" loading="lazy";
                        }
                    }
                }
            }
        }
        div.modal-details {
            h2.modal-title { (content.title) }
            p.modal-price { (content.price_label) }
            @if !content.description.is_empty() {
                p.modal-description { (content.description) }
            }
            @if !content.link.is_empty() {
                a.modal-link href=(content.link) target="_blank" rel="noopener" { "View in store" }
            }
        }
    }
}
