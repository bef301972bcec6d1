use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::key::VarKey;
use crate::slot::VarSlot;

/// Default bound on lock acquisition waits.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

/// Process-wide table of shared variables.
///
/// One registry exists per test-program run, constructed explicitly and
/// passed by `Arc` to each suite execution. The table starts empty and is
/// cleared only by [`VarRegistry::reset`] at program-run start; slots are
/// created lazily and live for the rest of the run.
///
/// The table mutex guards only lookup and insertion. It is never held
/// across a gate wait, so slot creation cannot stall behind a contended
/// variable.
pub struct VarRegistry {
	table: Mutex<FxHashMap<VarKey, Arc<VarSlot>>>,
	timeout: Duration,
}

impl VarRegistry {
	/// Creates an empty registry with the default lock timeout.
	pub fn new() -> Self {
		Self::with_timeout(DEFAULT_LOCK_TIMEOUT)
	}

	/// Creates an empty registry with the given lock timeout.
	pub fn with_timeout(timeout: Duration) -> Self {
		Self {
			table: Mutex::new(FxHashMap::default()),
			timeout,
		}
	}

	/// Bound on lock acquisition waits.
	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Clears the table. Call once at the start of each program run.
	pub fn reset(&self) {
		tracing::debug!("shared.registry.reset");
		self.table.lock().clear();
	}

	/// Number of live variables.
	pub fn len(&self) -> usize {
		self.table.lock().len()
	}

	/// Returns true if no variable has been created yet.
	pub fn is_empty(&self) -> bool {
		self.table.lock().is_empty()
	}

	pub(crate) fn lookup(&self, key: VarKey) -> Option<Arc<VarSlot>> {
		self.table.lock().get(&key).cloned()
	}

	pub(crate) fn lookup_or_create(&self, key: VarKey) -> Arc<VarSlot> {
		Arc::clone(self.table.lock().entry(key).or_insert_with(|| {
			tracing::debug!(var = %key, kind = %key.kind(), "shared.var.create");
			Arc::new(VarSlot::new(key.name()))
		}))
	}

	/// Renders every live variable: name, printable value, kind. One line
	/// per variable, sorted by name for stable output.
	pub fn dump_all(&self) -> String {
		let mut entries: Vec<(VarKey, Arc<VarSlot>)> =
			self.table.lock().iter().map(|(k, s)| (*k, Arc::clone(s))).collect();
		entries.sort_by_key(|(key, _)| key.name());

		let mut out = String::from("******* Dump of Variable Storage *********\n");
		out.push_str("****** Name *******  Value ******* Kind\n");
		for (key, slot) in entries {
			out.push_str(&format!("{key}: \t{} \t\t({})\n", slot.render(), key.kind()));
		}
		out
	}
}

impl Default for VarRegistry {
	fn default() -> Self {
		Self::new()
	}
}
