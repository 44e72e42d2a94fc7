//! Script builder

use bytes::Bytes;
use hash::H160;
use {Opcode, Script, Error, LengthPrefix};

/// Script builder
///
/// Push data prefixes are written for the given `LengthPrefix` reading, so the
/// built script decodes back to the same payloads under matching flags.
#[derive(Default)]
pub struct Builder {
	data: Bytes,
	length_prefix: LengthPrefix,
}

impl Builder {
	pub fn new(length_prefix: LengthPrefix) -> Self {
		Builder {
			data: Bytes::new(),
			length_prefix: length_prefix,
		}
	}

	/// Builds p2pkh script pubkey
	pub fn build_p2pkh(address: &H160) -> Script {
		Builder::default()
			.push_opcode(Opcode::OP_DUP)
			.push_opcode(Opcode::OP_HASH160)
			.push_prefixed(Opcode::OP_PUSHDATA1, &[H160::size() as u8], &**address)
			.push_opcode(Opcode::OP_EQUALVERIFY)
			.push_opcode(Opcode::OP_CHECKSIG)
			.into_script()
	}

	/// Builds the unlocking script matching a p2pkh script pubkey
	pub fn build_p2pkh_sig(signature: &[u8], public: &[u8]) -> Result<Script, Error> {
		Ok(Builder::default()
			.push_data(signature)?
			.push_data(public)?
			.into_script())
	}

	/// Pushes opcode to the end of script
	pub fn push_opcode(mut self, opcode: Opcode) -> Self {
		self.data.push(opcode as u8);
		self
	}

	/// Appends bool push operation to the end of script
	pub fn push_bool(mut self, value: bool) -> Self {
		if value {
			self.data.push(Opcode::OP_1 as u8);
		} else {
			self.data.push(Opcode::OP_0 as u8);
		}
		self
	}

	/// Appends a push of the single byte `n`, using `OP_0` ... `OP_16` where possible
	pub fn push_num(self, n: u8) -> Self {
		match Opcode::encode_op_n(n) {
			Some(opcode) => self.push_opcode(opcode),
			None => self.push_prefixed(Opcode::OP_PUSHDATA1, &[1], &[n]),
		}
	}

	/// Appends data push operation to the end of script, using the shortest prefix able to hold it
	pub fn push_data(self, data: &[u8]) -> Result<Self, Error> {
		let len = data.len();
		for opcode in &[Opcode::OP_PUSHDATA1, Opcode::OP_PUSHDATA2, Opcode::OP_PUSHDATA4] {
			let prefix_len = match opcode.push_data_prefix_len() {
				Some(prefix_len) => prefix_len,
				None => continue,
			};

			if let Some(prefix) = self.length_prefix.write_len(len, prefix_len) {
				return Ok(self.push_prefixed(*opcode, &prefix, data));
			}
		}

		Err(Error::PushSize(len))
	}

	fn push_prefixed(mut self, opcode: Opcode, prefix: &[u8], data: &[u8]) -> Self {
		self.data.push(opcode as u8);
		self.data.extend_from_slice(prefix);
		self.data.extend_from_slice(data);
		self
	}

	/// Builds final script
	pub fn into_script(self) -> Script {
		Script::new(self.data)
	}

	/// Builds final script bytes
	pub fn into_bytes(self) -> Bytes {
		self.data
	}
}

#[cfg(test)]
mod tests {
	use bytes::Bytes;
	use hash::H160;
	use {Opcode, Error, LengthPrefix, VerificationFlags};
	use super::Builder;

	#[test]
	fn test_build_p2pkh() {
		let hash: H160 = "b6a9c8c230722b7c748331a8b450f05566dc7d0f".into();
		let script = Builder::build_p2pkh(&hash);
		let expected: Bytes = "76a94c14b6a9c8c230722b7c748331a8b450f05566dc7d0f88ac".into();
		assert_eq!(script.to_bytes(), expected);
	}

	#[test]
	fn test_push_data_prefix_choice() {
		let script = Builder::default().push_data(&[0x5a]).unwrap().into_bytes();
		assert_eq!(script, vec![0x4c, 0x01, 0x5a].into());

		let data = vec![0x11; 300];
		let script = Builder::default().push_data(&data).unwrap().into_bytes();
		assert_eq!(&script[..3], &[0x4d, 0xff, 45]);

		let script = Builder::new(LengthPrefix::LittleEndian).push_data(&data).unwrap().into_bytes();
		assert_eq!(&script[..3], &[0x4d, 0x2c, 0x01]);

		let data = vec![0x11; 600];
		let script = Builder::default().push_data(&data).unwrap().into_bytes();
		assert_eq!(&script[..5], &[0x4e, 0xff, 0xff, 90, 0]);
	}

	#[test]
	fn test_push_data_too_large_for_byte_sum() {
		let data = vec![0; 1021];
		assert_eq!(Builder::default().push_data(&data).err(), Some(Error::PushSize(1021)));
		assert!(Builder::new(LengthPrefix::LittleEndian).push_data(&data).is_ok());
	}

	#[test]
	fn test_built_payloads_decode_back() {
		let small = vec![0xab; 3];
		let large = vec![0xcd; 700];
		for prefix in &[LengthPrefix::ByteSum, LengthPrefix::LittleEndian] {
			let script = Builder::new(*prefix)
				.push_data(&small).unwrap()
				.push_opcode(Opcode::OP_DROP)
				.push_data(&large).unwrap()
				.into_script();
			let flags = VerificationFlags::default().length_prefix(*prefix);
			let decoded = script.decode(&flags).unwrap();
			assert_eq!(decoded.payloads(), &[Bytes::from(small.clone()), Bytes::from(large.clone())]);
		}
	}

	#[test]
	fn test_push_num() {
		let script = Builder::default()
			.push_num(0)
			.push_num(16)
			.push_bool(true)
			.push_num(17)
			.into_bytes();
		assert_eq!(script, vec![0x00, 0x60, 0x51, 0x4c, 0x01, 0x11].into());
	}
}
