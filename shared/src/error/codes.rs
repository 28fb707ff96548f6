//! Unified error codes for the Vitrine catalog
//!
//! This module defines all error codes used across the storefront and the
//! back office. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Remote store errors
//! - 4xxx: Catalog errors
//! - 5xxx: File upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Session has expired
    SessionExpired = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Remote store ====================
    /// Remote store unavailable (network/timeout)
    StoreUnavailable = 3001,
    /// Query against the remote store failed
    QueryFailed = 3002,
    /// Write to the remote store failed
    WriteFailed = 3003,
    /// Batched write failed (no operation applied)
    BatchFailed = 3004,
    /// Pagination cursor no longer resolves
    CursorInvalid = 3005,

    // ==================== 4xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 4001,
    /// Product has invalid price
    ProductInvalidPrice = 4002,
    /// Category not found
    CategoryNotFound = 4101,
    /// Category is still referenced by active products
    CategoryInUse = 4102,
    /// Category slug already exists
    CategorySlugExists = 4103,

    // ==================== 5xxx: File upload ====================
    /// File too large
    FileTooLarge = 5001,
    /// Unsupported file format
    UnsupportedFileFormat = 5002,
    /// Invalid/corrupted image file
    InvalidImageFile = 5003,
    /// Empty file provided
    EmptyFile = 5004,
    /// No filename provided
    NoFilename = 5005,
    /// Blob upload failed
    UploadFailed = 5006,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Local cache read/write failed
    CacheError = 9002,
    /// Network error
    NetworkError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::SessionExpired => "Session has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Remote store
            ErrorCode::StoreUnavailable => "Remote store is unavailable",
            ErrorCode::QueryFailed => "Remote store query failed",
            ErrorCode::WriteFailed => "Remote store write failed",
            ErrorCode::BatchFailed => "Batched write failed",
            ErrorCode::CursorInvalid => "Pagination cursor is no longer valid",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product price is invalid",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryInUse => "Category is still referenced by active products",
            ErrorCode::CategorySlugExists => "Category slug already exists",

            // Upload
            ErrorCode::FileTooLarge => "File is too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid or corrupted image file",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::NoFilename => "No filename provided",
            ErrorCode::UploadFailed => "Blob upload failed",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::CacheError => "Local cache read/write failed",
            ErrorCode::NetworkError => "Network error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::SessionExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            // Remote store
            3001 => Ok(ErrorCode::StoreUnavailable),
            3002 => Ok(ErrorCode::QueryFailed),
            3003 => Ok(ErrorCode::WriteFailed),
            3004 => Ok(ErrorCode::BatchFailed),
            3005 => Ok(ErrorCode::CursorInvalid),

            // Catalog
            4001 => Ok(ErrorCode::ProductNotFound),
            4002 => Ok(ErrorCode::ProductInvalidPrice),
            4101 => Ok(ErrorCode::CategoryNotFound),
            4102 => Ok(ErrorCode::CategoryInUse),
            4103 => Ok(ErrorCode::CategorySlugExists),

            // Upload
            5001 => Ok(ErrorCode::FileTooLarge),
            5002 => Ok(ErrorCode::UnsupportedFileFormat),
            5003 => Ok(ErrorCode::InvalidImageFile),
            5004 => Ok(ErrorCode::EmptyFile),
            5005 => Ok(ErrorCode::NoFilename),
            5006 => Ok(ErrorCode::UploadFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::CacheError),
            9003 => Ok(ErrorCode::NetworkError),

            other => Err(InvalidErrorCode(other)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
