use crate::site::SiteId;

/// Interface to the test-suite lifecycle object.
///
/// One execution context exists per test-suite execution. It starts in the
/// foreground (synchronous with the controlling thread) and may cross into
/// background execution when instrument/pattern work is released to the
/// asynchronous engine. The transition is one-way per execution.
pub trait ExecutionContext {
	/// Returns true once the execution has been released to background.
	fn in_background(&self) -> bool;

	/// Active site identifiers for this execution, in configuration order.
	fn active_sites(&self) -> Vec<SiteId>;

	/// Name of the current execution, for diagnostics only.
	fn execution_name(&self) -> String;
}
