use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// Binary gate with bounded-wait acquisition.
///
/// Non-reentrant. One holder at a time; the gate does not track who holds
/// it, only that it is held. Callers keep their own bookkeeping of what
/// they acquired.
pub struct TimedGate {
	held: Mutex<bool>,
	freed: Condvar,
}

impl TimedGate {
	/// Creates a free gate.
	pub const fn new() -> Self {
		Self {
			held: Mutex::new(false),
			freed: Condvar::new(),
		}
	}

	/// Acquires the gate, waiting up to `timeout` for the current holder to
	/// release it. Returns false if the wait expired.
	#[must_use]
	pub fn acquire(&self, timeout: Duration) -> bool {
		let deadline = Instant::now() + timeout;
		let mut held = self.held.lock();
		while *held {
			if self.freed.wait_until(&mut held, deadline).timed_out() && *held {
				return false;
			}
		}
		*held = true;
		true
	}

	/// Releases the gate. A release of a free gate is a no-op.
	pub fn release(&self) {
		let mut held = self.held.lock();
		if *held {
			*held = false;
			self.freed.notify_one();
		}
	}

	/// Returns true while some caller holds the gate.
	pub fn is_held(&self) -> bool {
		*self.held.lock()
	}
}

impl Default for TimedGate {
	fn default() -> Self {
		Self::new()
	}
}
