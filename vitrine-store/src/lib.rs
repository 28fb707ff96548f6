//! Vitrine Store - contracts for the external managed backend
//!
//! The catalog delegates persistence, file storage, and authentication to
//! a remote managed service. This crate defines the traits the rest of
//! the workspace programs against:
//!
//! - [`DocumentStore`]: collection-scoped predicate queries, get-by-id,
//!   add, partial update, delete, and atomic batched writes
//! - [`BlobStore`]: binary payload in at a namespaced path, public URL
//!   out, with progress events during upload
//! - [`AuthProvider`]: current session, credential sign-in, sign-out,
//!   and an observable auth-state stream
//!
//! [`MemoryStore`], [`MemoryBlobStore`], and [`MemoryAuth`] are complete
//! in-process implementations used by tests and demos.

pub mod auth;
pub mod blob;
pub mod document;
pub mod error;
pub mod http_blob;
pub mod memory;

pub use auth::{AuthError, AuthProvider, MemoryAuth, Session};
pub use blob::{BlobError, BlobStore, MemoryBlobStore, UploadProgress};
pub use document::{
    BatchOp, Cursor, Direction, Document, DocumentStore, Fields, Filter, OrderBy, Query,
    WriteBatch,
};
pub use error::{StoreError, StoreResult};
pub use http_blob::HttpBlobStore;
pub use memory::MemoryStore;
