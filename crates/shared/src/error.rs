use std::time::Duration;

use thiserror::Error;

use crate::key::VarKey;
use crate::value::VarKind;

/// Errors raised by the shared variable registry and its lock protocol.
///
/// All variants are unrecoverable where raised and must end the current
/// test-method execution; the registry never swallows or retries them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VarError {
	/// A variable was read in the foreground before it was ever created.
	#[error("trying to read shared variable {0} before it has been created")]
	NotSet(VarKey),
	/// The variable's kind tag does not match the invoked accessor.
	#[error("shared variable {key} is of kind {found}, not {expected}")]
	TypeMismatch {
		/// Variable that was accessed.
		key: VarKey,
		/// Kind the accessor expected.
		expected: VarKind,
		/// Kind actually stored.
		found: VarKind,
	},
	/// Background access to a variable this execution never reserved.
	#[error(
		"suite {suite} accessed shared variable {key} in background without reserving it; \
		 reserve() must be called before releasing to background"
	)]
	UnreservedAccess {
		/// Variable that was accessed.
		key: VarKey,
		/// Execution name, for diagnostics.
		suite: String,
	},
	/// Bounded wait for the variable's lock expired.
	#[error("acquiring lock on shared variable {key} timed out after {timeout:?}")]
	LockTimeout {
		/// Variable whose lock was contended.
		key: VarKey,
		/// Configured bound on the wait.
		timeout: Duration,
	},
	/// `reserve()` was called after the execution released to background.
	#[error("reserve() must be called before releasing to background in suite {suite}")]
	ReserveInBackground {
		/// Execution name, for diagnostics.
		suite: String,
	},
	/// A slot expected to exist was absent. Indicates a registry bug, not a
	/// usage error.
	#[error("unexpected error: shared variable {0} not yet created")]
	Internal(VarKey),
}
