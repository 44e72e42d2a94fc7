//! Script decoding and evaluation flags

use std::mem;

/// How the length prefix of `OP_PUSHDATA1/2/4` is turned into a payload length.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LengthPrefix {
	/// Sum of the raw prefix bytes.
	///
	/// Matches the protocol only when at most one prefix byte is non-zero.
	/// Scripts encoded by existing tooling depend on it, so it stays the default.
	ByteSum,
	/// Little-endian unsigned integer, as the protocol defines it.
	LittleEndian,
}

impl Default for LengthPrefix {
	fn default() -> Self {
		LengthPrefix::ByteSum
	}
}

impl LengthPrefix {
	/// Payload length encoded by `prefix`.
	pub fn read_len(&self, prefix: &[u8]) -> usize {
		match *self {
			LengthPrefix::ByteSum => prefix.iter().map(|x| *x as usize).sum(),
			LengthPrefix::LittleEndian => prefix
				.iter()
				.enumerate()
				.fold(0, |acc, (i, x)| acc + ((*x as usize) << (i * 8))),
		}
	}

	/// Length prefix of `prefix_len` bytes encoding `len`, if `len` is representable.
	pub fn write_len(&self, len: usize, prefix_len: usize) -> Option<Vec<u8>> {
		match *self {
			LengthPrefix::ByteSum => {
				if len > prefix_len * 0xff {
					return None;
				}
				let mut remaining = len;
				let prefix = (0..prefix_len).map(|_| {
					let byte = if remaining > 0xff { 0xff } else { remaining };
					remaining -= byte;
					byte as u8
				}).collect();
				Some(prefix)
			},
			LengthPrefix::LittleEndian => {
				if prefix_len < mem::size_of::<usize>() && (len >> (prefix_len * 8)) != 0 {
					return None;
				}
				Some((0..prefix_len).map(|i| (len >> (i * 8)) as u8).collect())
			},
		}
	}
}

/// Script decoding and evaluation flags
#[derive(Default, Debug, PartialEq, Clone)]
pub struct VerificationFlags {
	/// Interpretation of push data length prefixes.
	pub length_prefix: LengthPrefix,

	/// Reject scripts longer than this many bytes before decoding them.
	pub max_script_size: Option<usize>,
}

impl VerificationFlags {
	pub fn length_prefix(mut self, value: LengthPrefix) -> Self {
		self.length_prefix = value;
		self
	}

	pub fn max_script_size(mut self, value: Option<usize>) -> Self {
		self.max_script_size = value;
		self
	}
}
