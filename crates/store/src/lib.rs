//! Sparse multi-site store for address-indexed measurement and patch data.
//!
//! One store instance is owned by one test method. Per active site it keeps
//! a pair of positionally aligned columns (addresses and payloads), indexed
//! by linear scan. The format targets large address spaces with very few set
//! entries, where scanning a short packed array beats hashing overhead and
//! avoids rehashing churn during incremental patch construction.
//!
//! The store has no internal locking and must not be shared across threads
//! without external synchronization.

/// Store error types.
pub mod error;
/// Payload shapes stored per address.
pub mod payload;
/// The sparse store itself.
pub mod sparse;

pub use error::StoreError;
pub use payload::{Payload, WidePayload, Word};
pub use sparse::SparseStore;
