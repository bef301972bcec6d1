//! Core types for multi-site test-program state.
//!
//! This crate provides the building blocks shared by the sparse store and the
//! shared variable registry:
//! - [`SiteId`]: Identifier of one parallel physical test channel
//! - [`MultiSite`]: Insertion-ordered per-site value container
//! - [`BitSeq`]: Variable-length bit sequence value
//! - [`ExecutionContext`]: Seam to the test-suite lifecycle object
//! - [`padded_hex`]: Fixed-width hex rendering for data dumps

/// Bit sequence values.
pub mod bitseq;
/// Execution-context seam consumed by the store and registry.
pub mod context;
/// Hex formatting helpers for data dumps.
pub mod hex;
/// Per-site value container.
pub mod multisite;
/// Site identifier type.
pub mod site;

pub use bitseq::BitSeq;
pub use context::ExecutionContext;
pub use hex::padded_hex;
pub use multisite::MultiSite;
pub use site::SiteId;
