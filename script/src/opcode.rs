//! Script opcodes.

use std::fmt;

/// Script opcodes.
///
/// The discriminant of every variant is its protocol byte.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[allow(non_camel_case_types)]
pub enum Opcode {
	// push value
	OP_0 = 0x00,
	OP_PUSHDATA1 = 0x4c,
	OP_PUSHDATA2 = 0x4d,
	OP_PUSHDATA4 = 0x4e,
	OP_1 = 0x51,
	OP_2 = 0x52,
	OP_3 = 0x53,
	OP_4 = 0x54,
	OP_5 = 0x55,
	OP_6 = 0x56,
	OP_7 = 0x57,
	OP_8 = 0x58,
	OP_9 = 0x59,
	OP_10 = 0x5a,
	OP_11 = 0x5b,
	OP_12 = 0x5c,
	OP_13 = 0x5d,
	OP_14 = 0x5e,
	OP_15 = 0x5f,
	OP_16 = 0x60,

	// stack ops
	OP_DROP = 0x75,
	OP_DUP = 0x76,

	// bit logic
	OP_EQUAL = 0x87,
	OP_EQUALVERIFY = 0x88,

	// crypto
	OP_HASH160 = 0xa9,
	OP_CHECKSIG = 0xac,
}

impl fmt::Display for Opcode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl Opcode {
	pub fn from_u8(u: u8) -> Option<Self> {
		use self::Opcode::*;
		match u {
			0x00 => Some(OP_0),
			0x4c => Some(OP_PUSHDATA1),
			0x4d => Some(OP_PUSHDATA2),
			0x4e => Some(OP_PUSHDATA4),
			0x51 => Some(OP_1),
			0x52 => Some(OP_2),
			0x53 => Some(OP_3),
			0x54 => Some(OP_4),
			0x55 => Some(OP_5),
			0x56 => Some(OP_6),
			0x57 => Some(OP_7),
			0x58 => Some(OP_8),
			0x59 => Some(OP_9),
			0x5a => Some(OP_10),
			0x5b => Some(OP_11),
			0x5c => Some(OP_12),
			0x5d => Some(OP_13),
			0x5e => Some(OP_14),
			0x5f => Some(OP_15),
			0x60 => Some(OP_16),
			0x75 => Some(OP_DROP),
			0x76 => Some(OP_DUP),
			0x87 => Some(OP_EQUAL),
			0x88 => Some(OP_EQUALVERIFY),
			0xa9 => Some(OP_HASH160),
			0xac => Some(OP_CHECKSIG),
			_ => None,
		}
	}

	/// Canonical mnemonic, used as the identifier in execution traces.
	pub fn name(&self) -> &'static str {
		use self::Opcode::*;
		match *self {
			OP_0 => "OP_0",
			OP_PUSHDATA1 => "OP_PUSHDATA1",
			OP_PUSHDATA2 => "OP_PUSHDATA2",
			OP_PUSHDATA4 => "OP_PUSHDATA4",
			OP_1 => "OP_1",
			OP_2 => "OP_2",
			OP_3 => "OP_3",
			OP_4 => "OP_4",
			OP_5 => "OP_5",
			OP_6 => "OP_6",
			OP_7 => "OP_7",
			OP_8 => "OP_8",
			OP_9 => "OP_9",
			OP_10 => "OP_10",
			OP_11 => "OP_11",
			OP_12 => "OP_12",
			OP_13 => "OP_13",
			OP_14 => "OP_14",
			OP_15 => "OP_15",
			OP_16 => "OP_16",
			OP_DROP => "OP_DROP",
			OP_DUP => "OP_DUP",
			OP_EQUAL => "OP_EQUAL",
			OP_EQUALVERIFY => "OP_EQUALVERIFY",
			OP_HASH160 => "OP_HASH160",
			OP_CHECKSIG => "OP_CHECKSIG",
		}
	}

	/// Opcodes whose payload length is carried by a following length prefix.
	pub fn is_push_data(&self) -> bool {
		self.push_data_prefix_len().is_some()
	}

	/// Size in bytes of the length prefix that follows a push data opcode.
	pub fn push_data_prefix_len(&self) -> Option<usize> {
		match *self {
			Opcode::OP_PUSHDATA1 => Some(1),
			Opcode::OP_PUSHDATA2 => Some(2),
			Opcode::OP_PUSHDATA4 => Some(4),
			_ => None,
		}
	}

	pub fn is_within_op_n(&self) -> bool {
		*self == Opcode::OP_0 || (*self >= Opcode::OP_1 && *self <= Opcode::OP_16)
	}

	/// Integer pushed by `OP_0` ... `OP_16`.
	pub fn decode_op_n(&self) -> Option<u8> {
		match *self {
			Opcode::OP_0 => Some(0),
			o if o >= Opcode::OP_1 && o <= Opcode::OP_16 => Some(o as u8 - (Opcode::OP_1 as u8 - 1)),
			_ => None,
		}
	}

	/// Opcode pushing `n`, for `n` in `0..=16`.
	pub fn encode_op_n(n: u8) -> Option<Self> {
		match n {
			0 => Some(Opcode::OP_0),
			1..=16 => Opcode::from_u8(Opcode::OP_1 as u8 + n - 1),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::Opcode;

	#[test]
	fn test_opcode_from_u8_matches_discriminant() {
		for byte in 0..=255u8 {
			if let Some(opcode) = Opcode::from_u8(byte) {
				assert_eq!(opcode as u8, byte);
			}
		}
	}

	#[test]
	fn test_protocol_table() {
		assert_eq!(Opcode::from_u8(0x00), Some(Opcode::OP_0));
		assert_eq!(Opcode::from_u8(0x4c), Some(Opcode::OP_PUSHDATA1));
		assert_eq!(Opcode::from_u8(0x4d), Some(Opcode::OP_PUSHDATA2));
		assert_eq!(Opcode::from_u8(0x4e), Some(Opcode::OP_PUSHDATA4));
		assert_eq!(Opcode::from_u8(0x51), Some(Opcode::OP_1));
		assert_eq!(Opcode::from_u8(0x60), Some(Opcode::OP_16));
		assert_eq!(Opcode::from_u8(0x75), Some(Opcode::OP_DROP));
		assert_eq!(Opcode::from_u8(0x76), Some(Opcode::OP_DUP));
		assert_eq!(Opcode::from_u8(0x87), Some(Opcode::OP_EQUAL));
		assert_eq!(Opcode::from_u8(0x88), Some(Opcode::OP_EQUALVERIFY));
		assert_eq!(Opcode::from_u8(0xa9), Some(Opcode::OP_HASH160));
		assert_eq!(Opcode::from_u8(0xac), Some(Opcode::OP_CHECKSIG));
	}

	#[test]
	fn test_unmapped_bytes() {
		let mapped = (0..=255u8).filter(|b| Opcode::from_u8(*b).is_some()).count();
		assert_eq!(mapped, 26);
		assert_eq!(Opcode::from_u8(0x01), None);
		assert_eq!(Opcode::from_u8(0x4f), None);
		assert_eq!(Opcode::from_u8(0x50), None);
		assert_eq!(Opcode::from_u8(0xff), None);
	}

	#[test]
	fn test_op_n() {
		assert_eq!(Opcode::OP_0.decode_op_n(), Some(0));
		assert_eq!(Opcode::OP_1.decode_op_n(), Some(1));
		assert_eq!(Opcode::OP_16.decode_op_n(), Some(16));
		assert_eq!(Opcode::OP_DUP.decode_op_n(), None);
		assert!(!Opcode::OP_PUSHDATA1.is_within_op_n());
		for n in 0..17u8 {
			assert_eq!(Opcode::encode_op_n(n).and_then(|o| o.decode_op_n()), Some(n));
		}
		assert_eq!(Opcode::encode_op_n(17), None);
	}

	#[test]
	fn test_push_data_prefix_len() {
		assert_eq!(Opcode::OP_PUSHDATA1.push_data_prefix_len(), Some(1));
		assert_eq!(Opcode::OP_PUSHDATA2.push_data_prefix_len(), Some(2));
		assert_eq!(Opcode::OP_PUSHDATA4.push_data_prefix_len(), Some(4));
		assert!(!Opcode::OP_CHECKSIG.is_push_data());
		assert_eq!(Opcode::OP_HASH160.to_string(), "OP_HASH160");
	}
}
