use std::collections::HashMap;
use std::sync::Arc;

use sitelink_primitives::{BitSeq, ExecutionContext, MultiSite};
use tracing::{debug, trace, warn};

use crate::error::VarError;
use crate::key::VarKey;
use crate::registry::VarRegistry;
use crate::slot::VarSlot;
use crate::value::{VarKind, VarValue};

/// Per-execution handle to the shared variable registry.
///
/// One handle exists per test-suite execution. It tracks which variables
/// the execution currently holds, and enforces the foreground/background
/// access protocol:
///
/// - [`reserve`](Self::reserve) acquires locks in the foreground that
///   survive the release-to-background transition.
/// - Ad-hoc foreground `set`/`get` acquires, accesses, and releases
///   immediately — unless a prior reservation already holds the lock.
/// - Background access to a never-reserved variable fails fast.
///
/// Call [`release_all`](Self::release_all) once when the execution,
/// including any background portion, completes.
pub struct SuiteVars<C: ExecutionContext> {
	registry: Arc<VarRegistry>,
	ctx: C,
	reserved: Vec<VarKey>,
}

impl<C: ExecutionContext> SuiteVars<C> {
	/// Binds an execution context to the shared registry.
	pub fn new(registry: Arc<VarRegistry>, ctx: C) -> Self {
		Self {
			registry,
			ctx,
			reserved: Vec::new(),
		}
	}

	/// The execution context this handle serves.
	pub fn ctx(&self) -> &C {
		&self.ctx
	}

	/// Keys currently held by this execution.
	pub fn reserved(&self) -> &[VarKey] {
		&self.reserved
	}

	/// Reserves variables for this execution.
	///
	/// Must be called before releasing to background; mandatory for any
	/// variable accessed after that point. For each key not already held,
	/// the slot is created if absent and its lock acquired with the
	/// registry's bounded wait. Reservations persist across the
	/// foreground-to-background transition and are dropped by
	/// [`release_all`](Self::release_all).
	pub fn reserve(&mut self, keys: impl IntoIterator<Item = VarKey>) -> Result<(), VarError> {
		if self.ctx.in_background() {
			return Err(VarError::ReserveInBackground {
				suite: self.ctx.execution_name(),
			});
		}
		for key in keys {
			if self.reserved.contains(&key) {
				continue;
			}
			debug!(var = %key, suite = %self.ctx.execution_name(), "shared.reserve");
			self.access(key, true)?;
		}
		Ok(())
	}

	/// Stores a new value, creating the variable on first use.
	///
	/// Valid in the foreground when no other suite holds the lock, or in
	/// the background when this suite reserved the variable beforehand.
	pub fn set(&mut self, key: VarKey, value: impl Into<VarValue>) -> Result<(), VarError> {
		let value = value.into();
		if value.kind() != key.kind() {
			return Err(VarError::TypeMismatch {
				key,
				expected: value.kind(),
				found: key.kind(),
			});
		}
		// Membership must be checked before the access: the access itself
		// adds the key to the reserved set, and only a pre-existing
		// reservation may keep the lock afterwards.
		let was_reserved = self.reserved.contains(&key);
		let slot = self.access(key, true)?;
		slot.store(value);
		if !was_reserved {
			self.release_in_foreground(key)?;
		}
		Ok(())
	}

	/// Releases this execution's hold on one variable before the suite ends.
	///
	/// Useful when a variable was reserved but turns out to be
	/// foreground-only; keeping the lock to the end of the suite would
	/// stall the next suite's acquisition.
	pub fn release(&mut self, key: VarKey) -> Result<(), VarError> {
		let slot = self.registry.lookup(key).ok_or(VarError::Internal(key))?;
		slot.gate().release();
		self.reserved.retain(|k| *k != key);
		trace!(var = %key, "shared.lock.release");
		Ok(())
	}

	/// Releases every variable held by this execution.
	///
	/// Call once when the execution, including any background portion,
	/// completes.
	pub fn release_all(&mut self) {
		for key in std::mem::take(&mut self.reserved) {
			match self.registry.lookup(key) {
				Some(slot) => {
					slot.gate().release();
					trace!(var = %key, "shared.lock.release");
				}
				None => debug!(var = %key, "shared.release.missing_slot"),
			}
		}
	}

	/// Resolves a slot under the access protocol.
	///
	/// Background: the key must have been reserved; the slot is returned
	/// without touching its gate. Foreground: the slot is created if
	/// allowed, and the gate acquired unless this execution already holds
	/// it. The registry table mutex is released before the gate wait.
	fn access(&mut self, key: VarKey, allow_create: bool) -> Result<Arc<VarSlot>, VarError> {
		if self.ctx.in_background() {
			if !self.reserved.contains(&key) {
				return Err(VarError::UnreservedAccess {
					key,
					suite: self.ctx.execution_name(),
				});
			}
			// reserved in foreground implies the slot exists and this
			// execution holds its gate
			return self.registry.lookup(key).ok_or(VarError::Internal(key));
		}

		let slot = if allow_create {
			// slot creation only happens in foreground, single-threaded
			// relative to creation; only the gate below is contended
			self.registry.lookup_or_create(key)
		} else {
			self.registry.lookup(key).ok_or(VarError::NotSet(key))?
		};

		// a key in the reserved set means the gate is already held; only
		// the first access may and must acquire it
		if self.reserved.contains(&key) {
			return Ok(slot);
		}

		let timeout = self.registry.timeout();
		if !slot.gate().acquire(timeout) {
			warn!(var = %key, suite = %self.ctx.execution_name(), ?timeout, "shared.lock.timeout");
			return Err(VarError::LockTimeout { key, timeout });
		}
		trace!(var = %key, "shared.lock.acquire");
		self.reserved.push(key);
		Ok(slot)
	}

	/// Undoes the implicit acquisition of an ad-hoc foreground access.
	///
	/// In background this is a no-op: more accesses to the (necessarily
	/// reserved) variable may follow.
	fn release_in_foreground(&mut self, key: VarKey) -> Result<(), VarError> {
		if self.ctx.in_background() {
			return Ok(());
		}
		self.release(key)
	}

	/// Clones out the current value under the access protocol.
	fn read(&mut self, key: VarKey) -> Result<Option<VarValue>, VarError> {
		let was_reserved = self.reserved.contains(&key);
		let slot = self.access(key, false)?;
		let value = slot.load();
		if !was_reserved {
			self.release_in_foreground(key)?;
		}
		Ok(value)
	}

	fn expect_kind(&self, key: VarKey, expected: VarKind) -> Result<(), VarError> {
		if key.kind() != expected {
			return Err(VarError::TypeMismatch {
				key,
				expected,
				found: key.kind(),
			});
		}
		Ok(())
	}
}

macro_rules! typed_getter {
	($(#[$doc:meta])* $fn_name:ident, $variant:ident, $ty:ty) => {
		impl<C: ExecutionContext> SuiteVars<C> {
			$(#[$doc])*
			///
			/// Returns `Ok(None)` for a variable that was created (e.g. by
			/// `reserve`) but never set.
			pub fn $fn_name(&mut self, key: VarKey) -> Result<Option<$ty>, VarError> {
				self.expect_kind(key, VarKind::$variant)?;
				match self.read(key)? {
					None => Ok(None),
					Some(VarValue::$variant(v)) => Ok(Some(v)),
					Some(other) => Err(VarError::TypeMismatch {
						key,
						expected: VarKind::$variant,
						found: other.kind(),
					}),
				}
			}
		}
	};
}

typed_getter!(
	/// Reads a per-site double variable.
	get_double,
	Double,
	MultiSite<f64>
);
typed_getter!(
	/// Reads a per-site string variable.
	get_str,
	Str,
	MultiSite<String>
);
typed_getter!(
	/// Reads a per-site boolean variable.
	get_bool,
	Bool,
	MultiSite<bool>
);
typed_getter!(
	/// Reads a per-site long variable.
	get_long,
	Long,
	MultiSite<i64>
);
typed_getter!(
	/// Reads a per-site long-array variable.
	get_long_array,
	LongArray,
	MultiSite<Vec<i64>>
);
typed_getter!(
	/// Reads a per-site bit-sequence variable.
	get_bit_seq,
	BitSeq,
	MultiSite<BitSeq>
);
typed_getter!(
	/// Reads a keyed map of per-site doubles.
	get_map_double,
	MapDouble,
	HashMap<String, MultiSite<f64>>
);

impl<C: ExecutionContext> Drop for SuiteVars<C> {
	fn drop(&mut self) {
		if self.reserved.is_empty() {
			return;
		}
		warn!(
			suite = %self.ctx.execution_name(),
			held = self.reserved.len(),
			"shared.suite.dropped_with_reservations"
		);
		self.release_all();
	}
}
