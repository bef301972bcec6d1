/// A payload shape the sparse store can hold per address.
///
/// Payloads are fixed-width stacks of 64-bit words. Two shapes exist:
/// [`Word`] for values up to 64 bits and [`WidePayload`] for wider values
/// split into four words (e.g. packed sub-fields of a wide register).
pub trait Payload: Copy + PartialEq {
	/// Sentinel returned by soft-failure reads of unset addresses.
	const MISSING: Self;

	/// The payload's words, most-significant word first.
	fn words(&self) -> &[i64];
}

/// Single-word payload for data up to 64 bits.
pub type Word = i64;

/// Four-word payload for data wider than 64 bits.
pub type WidePayload = [i64; 4];

impl Payload for Word {
	const MISSING: Self = -1;

	fn words(&self) -> &[i64] {
		std::slice::from_ref(self)
	}
}

impl Payload for WidePayload {
	const MISSING: Self = [-1; 4];

	fn words(&self) -> &[i64] {
		self
	}
}
