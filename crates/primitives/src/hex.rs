/// Formats one payload word as a fixed-width upper-hex string,
/// most-significant nibble first.
///
/// The word is truncated to `digits * 4` bits, so negative words render as
/// their low-order two's-complement nibbles.
pub fn padded_hex(word: i64, digits: usize) -> String {
	let bits = digits * 4;
	let value = if bits >= 64 {
		word as u64
	} else {
		(word as u64) & ((1u64 << bits) - 1)
	};
	format!("{value:0width$X}", width = digits)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pads_to_requested_width() {
		assert_eq!(padded_hex(0x55, 8), "00000055");
		assert_eq!(padded_hex(0, 4), "0000");
	}

	#[test]
	fn truncates_negative_words() {
		assert_eq!(padded_hex(-1, 8), "FFFFFFFF");
		assert_eq!(padded_hex(-1, 9), "FFFFFFFFF");
	}

	#[test]
	fn full_width_word() {
		assert_eq!(padded_hex(-1, 16), "FFFFFFFFFFFFFFFF");
	}
}
