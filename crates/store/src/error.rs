use sitelink_primitives::SiteId;
use thiserror::Error;

/// Errors raised by sparse store reads.
///
/// Both variants are unrecoverable at the point raised and abort the current
/// test-method execution; retry policy, if any, is layered above.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
	/// A hard-fail read was requested for an address with no payload.
	#[error("no data set on site {site} at addr 0x{addr:X}")]
	NotSet {
		/// Site the read targeted.
		site: SiteId,
		/// Address that was queried.
		addr: i64,
	},
	/// Sites disagree on presence or payload content for a common-value read.
	#[error("not all sites have the same data at addr 0x{addr:X}, no common value")]
	Inconsistent {
		/// Address that was queried.
		addr: i64,
	},
}
