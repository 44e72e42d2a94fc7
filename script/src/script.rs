//! Serialized script and its decoded form.

use std::{fmt, ops};
use bytes::Bytes;
use {Opcode, Error, VerificationFlags, LengthPrefix};

/// Serialized script, as supplied by the caller.
#[derive(PartialEq, Debug, Clone)]
pub struct Script {
	data: Bytes,
}

impl From<&'static str> for Script {
	fn from(s: &'static str) -> Self {
		Script::new(s.into())
	}
}

impl From<Bytes> for Script {
	fn from(s: Bytes) -> Self {
		Script::new(s)
	}
}

impl From<Vec<u8>> for Script {
	fn from(v: Vec<u8>) -> Self {
		Script::new(v.into())
	}
}

impl<'a> From<&'a [u8]> for Script {
	fn from(v: &'a [u8]) -> Self {
		Script::new(v.into())
	}
}

impl From<Script> for Bytes {
	fn from(script: Script) -> Self {
		script.data
	}
}

impl Script {
	/// Script constructor.
	pub fn new(data: Bytes) -> Self {
		Script {
			data: data,
		}
	}

	pub fn to_bytes(&self) -> Bytes {
		self.data.clone()
	}

	/// Is empty script
	pub fn is_empty(&self) -> bool {
		self.data.len() == 0
	}

	/// Extra-fast test for pay-to-public-key-hash (P2PKH) scripts.
	///
	/// The hash is pushed with `OP_PUSHDATA1`, so the layout is
	/// `OP_DUP OP_HASH160 OP_PUSHDATA1 0x14 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`.
	pub fn is_pay_to_public_key_hash(&self) -> bool {
		self.data.len() == 26 &&
			self.data[0] == Opcode::OP_DUP as u8 &&
			self.data[1] == Opcode::OP_HASH160 as u8 &&
			self.data[2] == Opcode::OP_PUSHDATA1 as u8 &&
			self.data[3] == 20 &&
			self.data[24] == Opcode::OP_EQUALVERIFY as u8 &&
			self.data[25] == Opcode::OP_CHECKSIG as u8
	}

	pub fn get_opcode(&self, position: usize) -> Result<Opcode, Error> {
		let byte = *self.data.get(position).ok_or(Error::BufferUnderrun {
			needed: 1,
			available: 0,
		})?;
		Opcode::from_u8(byte).ok_or(Error::UnknownOpcode(byte))
	}

	pub fn get_instruction(&self, position: usize, length_prefix: LengthPrefix) -> Result<Instruction, Error> {
		let opcode = self.get_opcode(position)?;
		let instruction = match opcode.push_data_prefix_len() {
			Some(len) => {
				let slice = self.take(position + 1, len)?;
				let n = length_prefix.read_len(slice);
				let bytes = self.take(position + 1 + len, n)?;
				Instruction {
					opcode: opcode,
					step: len + n + 1,
					data: Some(bytes),
				}
			},
			None => Instruction {
				opcode: opcode,
				step: 1,
				data: None,
			},
		};

		Ok(instruction)
	}

	/// `len` bytes starting at `offset`, never reading past the end of the script.
	#[inline]
	pub fn take(&self, offset: usize, len: usize) -> Result<&[u8], Error> {
		let available = self.data.len().saturating_sub(offset);
		if offset > self.data.len() || len > available {
			Err(Error::BufferUnderrun {
				needed: len,
				available: available,
			})
		} else {
			Ok(&self.data[offset..offset + len])
		}
	}

	pub fn iter(&self, length_prefix: LengthPrefix) -> Instructions {
		Instructions { position: 0, script: self, length_prefix: length_prefix }
	}

	/// Decodes the whole script before anything executes.
	///
	/// The first undecodable byte aborts decoding; no partial result is returned.
	pub fn decode(&self, flags: &VerificationFlags) -> Result<DecodedScript, Error> {
		if let Some(max) = flags.max_script_size {
			if self.data.len() > max {
				return Err(Error::ScriptSize);
			}
		}

		let mut decoded = DecodedScript::default();
		for instruction in self.iter(flags.length_prefix) {
			let instruction = instruction?;
			decoded.opcodes.push(instruction.opcode);
			if let Some(data) = instruction.data {
				decoded.payloads.push(data.into());
			}
		}

		Ok(decoded)
	}
}

/// Opcodes of a script in appearance order, with the payloads of its push data
/// opcodes kept aside in the same order.
#[derive(PartialEq, Debug, Default, Clone)]
pub struct DecodedScript {
	opcodes: Vec<Opcode>,
	payloads: Vec<Bytes>,
}

impl DecodedScript {
	pub fn opcodes(&self) -> &[Opcode] {
		&self.opcodes
	}

	pub fn payloads(&self) -> &[Bytes] {
		&self.payloads
	}

	pub fn len(&self) -> usize {
		self.opcodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.opcodes.is_empty()
	}
}

pub struct Instructions<'a> {
	position: usize,
	script: &'a Script,
	length_prefix: LengthPrefix,
}

impl<'a> Iterator for Instructions<'a> {
	type Item = Result<Instruction<'a>, Error>;

	fn next(&mut self) -> Option<Result<Instruction<'a>, Error>> {

		if self.script.len() <= self.position { return None; }

		let instruction = match self.script.get_instruction(self.position, self.length_prefix) {
			Ok(x) => x,
			Err(e) => {
				// stop after the first error
				self.position = self.script.len();
				return Some(Err(e));
			},
		};

		self.position += instruction.step;

		Some(Ok(instruction))
	}
}

impl ops::Deref for Script {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.data
	}
}

pub struct Instruction<'a> {
	pub opcode: Opcode,
	pub step: usize,
	pub data: Option<&'a [u8]>,
}

impl Script {
	/// Opcode listing with push data lengths read as `length_prefix`.
	///
	/// `Display` always reads them as `LengthPrefix::default()`.
	pub fn to_string_with(&self, length_prefix: LengthPrefix) -> String {
		let mut result = String::new();
		// writing to a String cannot fail
		let _ = self.write_listing(&mut result, length_prefix);
		result
	}

	fn write_listing<W: fmt::Write>(&self, w: &mut W, length_prefix: LengthPrefix) -> fmt::Result {
		for instruction in self.iter(length_prefix) {
			let instruction = match instruction {
				Ok(i) => i,
				Err(e) => return write!(w, "{}", e),
			};

			match instruction.data {
				Some(data) => writeln!(w, "{} 0x{}", instruction.opcode, Bytes::from(data))?,
				None => writeln!(w, "{}", instruction.opcode)?,
			}
		}

		Ok(())
	}
}

impl fmt::Display for Script {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.write_listing(f, LengthPrefix::default())
	}
}
