//! Shared types for the Vitrine catalog
//!
//! Common types used across the storefront and back-office crates:
//! catalog models, error types, and utility helpers.

pub mod error;
pub mod mapping;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductUpdate};
