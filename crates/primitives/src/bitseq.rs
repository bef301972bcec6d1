/// Variable-length bit sequence, most-significant bit first.
///
/// Used for shift-register style values (trim chains, fuse words) whose
/// width is not known at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSeq {
	bits: Vec<bool>,
}

impl BitSeq {
	/// Creates an empty sequence.
	pub const fn new() -> Self {
		Self { bits: Vec::new() }
	}

	/// Appends one bit at the least-significant end.
	pub fn push(&mut self, bit: bool) {
		self.bits.push(bit);
	}

	/// Returns the bit at `index`, counted from the most-significant end.
	pub fn get(&self, index: usize) -> Option<bool> {
		self.bits.get(index).copied()
	}

	/// Number of bits in the sequence.
	pub fn len(&self) -> usize {
		self.bits.len()
	}

	/// Returns true if the sequence holds no bits.
	pub fn is_empty(&self) -> bool {
		self.bits.is_empty()
	}

	/// Iterates bits from the most-significant end.
	pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
		self.bits.iter().copied()
	}
}

impl From<Vec<bool>> for BitSeq {
	fn from(bits: Vec<bool>) -> Self {
		Self { bits }
	}
}

impl FromIterator<bool> for BitSeq {
	fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
		Self { bits: iter.into_iter().collect() }
	}
}

impl std::fmt::Display for BitSeq {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for bit in &self.bits {
			f.write_str(if *bit { "1" } else { "0" })?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn displays_as_binary_digits() {
		let seq: BitSeq = [true, false, true, true].into_iter().collect();
		assert_eq!(seq.to_string(), "1011");
		assert_eq!(seq.len(), 4);
		assert_eq!(seq.get(1), Some(false));
	}
}
