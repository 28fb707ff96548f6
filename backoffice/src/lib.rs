//! Vitrine Back Office - administrative catalog services
//!
//! CRUD for products and categories with per-field form validation,
//! bulk operations over an ephemeral selection set, the analytics
//! summary, and the image upload pipeline. Admin surfaces are gated by
//! the external auth provider through [`access::require_admin`].

pub mod access;
pub mod analytics;
pub mod bulk;
pub mod categories;
pub mod forms;
pub mod products;
pub mod upload;

pub use access::require_admin;
pub use analytics::{CatalogSummary, CategoryCount, Dashboard, PriceStats};
pub use bulk::{BulkActions, Confirmation, Selection};
pub use categories::AdminCategories;
pub use forms::{CategoryForm, FieldError, FormErrors, ProductForm, validate_form};
pub use products::AdminProducts;
pub use upload::{ImageUploadService, UploadedImage};
