//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Normalized matching key used as the filter value.
    /// Defaulted from the lowercased name when the document omits it.
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Number of products referencing this category (admin view only)
    #[serde(default)]
    pub product_count: u32,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    /// Derived from the name when not supplied
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// Update category payload (partial; only provided fields are written)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}
