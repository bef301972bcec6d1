/// Identifier of one parallel physical test channel.
///
/// Sites are small non-negative integers assigned by the test-program
/// configuration. The active set is queried from the execution context,
/// never chosen by this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SiteId(pub u16);

impl SiteId {
	/// Returns the underlying site number.
	#[inline]
	pub const fn as_u16(self) -> u16 {
		self.0
	}
}

impl From<u16> for SiteId {
	fn from(n: u16) -> Self {
		Self(n)
	}
}

impl std::fmt::Display for SiteId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
