//! Shared variable registry for parallel test-suite executions.
//!
//! Test suites run partly on the controlling thread (foreground) and partly
//! on an asynchronous execution engine (background). Suites exchange named,
//! typed, multi-site variables through one process-wide [`VarRegistry`],
//! with mutual exclusion per variable and bounded-wait acquisition.
//!
//! Two access disciplines exist, keyed per suite execution via
//! [`SuiteVars`]:
//! - **Reservation** ([`SuiteVars::reserve`]): explicit acquisition in the
//!   foreground that survives the release-to-background transition and is
//!   dropped only when the execution fully completes.
//! - **Ad-hoc foreground access**: a bare `set`/`get` acquires the lock,
//!   performs the access, and releases immediately.
//!
//! Background code may only touch variables it reserved beforehand; that
//! path fails fast rather than blocking.

/// Registry and lock protocol errors.
pub mod error;
/// Per-slot binary gate with timed acquire.
pub mod gate;
/// Variable identity.
pub mod key;
/// Process-wide variable table.
pub mod registry;
/// Lockable typed value container.
pub mod slot;
/// Per-execution access handle.
pub mod suite;
/// Variable kinds and values.
pub mod value;

pub use error::VarError;
pub use gate::TimedGate;
pub use key::VarKey;
pub use registry::{DEFAULT_LOCK_TIMEOUT, VarRegistry};
pub use sitelink_primitives::ExecutionContext;
pub use slot::VarSlot;
pub use suite::SuiteVars;
pub use value::{VarKind, VarValue};
