//! Interpreter errors

use std::fmt;
use crypto;

/// Interpreter errors
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
	// Configuration.
	NotReady,

	// Decoding.
	UnknownOpcode(u8),
	BufferUnderrun {
		needed: usize,
		available: usize,
	},
	ScriptSize,
	PushSize(usize),

	// Runtime.
	StackUnderflow,
	EmptyStack,
	ScriptFailure,
	Hashing(crypto::Error),
	MissingPayload,
}

impl Error {
	/// Failures raised while turning raw bytes into a decoded script.
	pub fn is_decode(&self) -> bool {
		match *self {
			Error::UnknownOpcode(_) |
			Error::BufferUnderrun { .. } |
			Error::ScriptSize |
			Error::PushSize(_) => true,
			_ => false,
		}
	}

	/// Failures that belong to the script pair itself and resolve to a `false` verdict.
	pub fn is_runtime(&self) -> bool {
		match *self {
			Error::StackUnderflow |
			Error::EmptyStack |
			Error::ScriptFailure |
			Error::Hashing(_) |
			Error::MissingPayload => true,
			_ => false,
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::NotReady => f.write_str("Unlocking and locking scripts must both be supplied before evaluation"),

			Error::UnknownOpcode(byte) => write!(f, "Unknown opcode 0x{:02x}", byte),
			Error::BufferUnderrun { needed, available } =>
				write!(f, "Script ended early: needed {} bytes, {} available", needed, available),
			Error::ScriptSize => f.write_str("Script is too long"),
			Error::PushSize(len) => write!(f, "Cannot encode a push of {} bytes", len),

			Error::StackUnderflow => f.write_str("Not enough stack elements for operation"),
			Error::EmptyStack => f.write_str("Stack is empty"),
			Error::ScriptFailure => f.write_str("Failed equal verify operation"),
			Error::Hashing(ref err) => write!(f, "Hash160 failed: {}", err),
			Error::MissingPayload => f.write_str("Push data opcode has no payload"),
		}
	}
}
