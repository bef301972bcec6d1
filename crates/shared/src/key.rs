use crate::value::VarKind;

/// Identity of a shared variable: a name plus its declared value kind.
///
/// Keys are defined as constants by the test program, independent of any
/// suite instance. Two keys with the same name but different kinds are
/// distinct variables.
///
/// ```
/// use sitelink_shared::{VarKey, VarKind};
///
/// const VREF_TRIM: VarKey = VarKey::new("vref_trim", VarKind::Double);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarKey {
	name: &'static str,
	kind: VarKind,
}

impl VarKey {
	/// Creates a key with the given name and kind.
	pub const fn new(name: &'static str, kind: VarKind) -> Self {
		Self { name, kind }
	}

	/// Variable name.
	pub const fn name(self) -> &'static str {
		self.name
	}

	/// Declared value kind.
	pub const fn kind(self) -> VarKind {
		self.kind
	}
}

impl std::fmt::Display for VarKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name)
	}
}
