//! Admin form validation
//!
//! Form payloads with per-field rules. Validation failures surface next
//! to the offending input: each error names its field, and the first
//! invalid field (in declaration order) is the focus target. Submission
//! is blocked while any error remains.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use validator::{Validate, ValidationError, ValidationErrors};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category
pub const MAX_NAME_LEN: u64 = 200;

/// Descriptions
pub const MAX_DESCRIPTION_LEN: u64 = 2000;

/// URLs / image paths
pub const MAX_URL_LEN: u64 = 2048;

// ── Image file limits ───────────────────────────────────────────────

/// Maximum image file size (5MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Supported image formats
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Product create/edit form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, max = MAX_NAME_LEN, message = "name must not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,

    #[validate(custom(function = validate_price))]
    pub price: Decimal,

    #[validate(length(max = MAX_DESCRIPTION_LEN, message = "description is too long"))]
    #[serde(default)]
    pub description: String,

    #[validate(custom(function = validate_optional_url))]
    pub link: Option<String>,

    #[validate(custom(function = validate_optional_url))]
    pub image: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,
}

/// Category create/edit form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = MAX_NAME_LEN, message = "name must not be empty"))]
    pub name: String,

    /// Derived from the name when omitted
    pub slug: Option<String>,

    #[validate(length(max = MAX_DESCRIPTION_LEN, message = "description is too long"))]
    #[serde(default)]
    pub description: String,
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(field_error("price", "price must not be negative"));
    }
    Ok(())
}

/// Only http(s) URLs are accepted; anything else is a disallowed scheme
fn validate_optional_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Ok(());
    }
    if url.len() as u64 > MAX_URL_LEN {
        return Err(field_error("url", "URL is too long"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(field_error("url", "URL must use http or https"));
    }
    Ok(())
}

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All failures of one submission, in field declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    pub fields: Vec<FieldError>,
}

impl FormErrors {
    /// The field that should receive focus
    pub fn first_invalid(&self) -> Option<&str> {
        self.fields.first().map(|f| f.field.as_str())
    }
}

impl From<FormErrors> for AppError {
    fn from(errors: FormErrors) -> Self {
        let mut err = AppError::new(ErrorCode::ValidationFailed);
        if let Some(field) = errors.first_invalid() {
            err = err.with_detail("first_invalid", field.to_string());
        }
        err.with_detail(
            "fields",
            serde_json::to_value(&errors.fields).unwrap_or_default(),
        )
    }
}

/// Declaration order of a form's fields, used to pick the focus target
pub trait FieldOrder {
    const FIELDS: &'static [&'static str];
}

impl FieldOrder for ProductForm {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "category",
        "price",
        "description",
        "link",
        "image",
        "images",
    ];
}

impl FieldOrder for CategoryForm {
    const FIELDS: &'static [&'static str] = &["name", "slug", "description"];
}

/// Validate a form, returning field-ordered errors on failure
pub fn validate_form<T: Validate + FieldOrder>(form: &T) -> Result<(), FormErrors> {
    match form.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(order_errors::<T>(&errors)),
    }
}

fn order_errors<T: FieldOrder>(errors: &ValidationErrors) -> FormErrors {
    let by_field = errors.field_errors();
    let mut fields = Vec::new();
    for field in T::FIELDS {
        if let Some(field_errors) = by_field.get(*field) {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                fields.push(FieldError {
                    field: field.to_string(),
                    message,
                });
            }
        }
    }
    FormErrors { fields }
}

/// Validate an uploaded image file: size cap, allowed extension, and a
/// decode check so corrupted payloads are rejected before upload.
pub fn validate_image_file(data: &[u8], filename: &str) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    if data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File too large. Maximum size is {}MB",
                MAX_IMAGE_BYTES / 1024 / 1024
            ),
        ));
    }

    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::NoFilename,
                format!("Invalid file extension for: {}", filename),
            )
        })?;
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::with_message(
            ErrorCode::InvalidImageFile,
            format!("Invalid image file ({}): {}", ext, e),
        ));
    }

    Ok(())
}
