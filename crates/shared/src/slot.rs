use parking_lot::Mutex;

use crate::gate::TimedGate;
use crate::value::VarValue;

/// Lockable container for one shared variable.
///
/// Created lazily on first access and never destroyed; the value cell stays
/// `None` until the first `set`. The gate serializes access across suite
/// executions; the value mutex only guards the cell itself and is never
/// held across a wait.
pub struct VarSlot {
	name: &'static str,
	gate: TimedGate,
	value: Mutex<Option<VarValue>>,
}

impl VarSlot {
	pub(crate) fn new(name: &'static str) -> Self {
		Self {
			name,
			gate: TimedGate::new(),
			value: Mutex::new(None),
		}
	}

	/// Variable name, for diagnostics.
	pub fn name(&self) -> &'static str {
		self.name
	}

	pub(crate) fn gate(&self) -> &TimedGate {
		&self.gate
	}

	/// Replaces the stored value.
	pub(crate) fn store(&self, value: VarValue) {
		*self.value.lock() = Some(value);
	}

	/// Clones out the stored value, `None` if never set.
	pub(crate) fn load(&self) -> Option<VarValue> {
		self.value.lock().clone()
	}

	/// Printable form of the stored value.
	pub fn render(&self) -> String {
		match &*self.value.lock() {
			Some(value) => value.to_string(),
			None => "value not set".to_string(),
		}
	}
}
