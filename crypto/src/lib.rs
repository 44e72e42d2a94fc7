//! Hash primitives used by script evaluation.
//!
//! Every function here is stateless; a fresh hasher is built per call, so the
//! functions are safe to share between evaluators on different threads.

extern crate primitives;
extern crate ripemd;
extern crate sha2;

use std::fmt;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use primitives::hash::{H160, H256};

/// Hash engine errors
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
	/// A digest primitive produced output of an unexpected size.
	InvalidDigestLength {
		expected: usize,
		actual: usize,
	},
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::InvalidDigestLength { expected, actual } =>
				write!(f, "Digest has {} bytes, expected {}", actual, expected),
		}
	}
}

/// RIPEMD160
#[inline]
pub fn ripemd160(input: &[u8]) -> H160 {
	let mut result = H160::default();
	result.copy_from_slice(&Ripemd160::digest(input));
	result
}

/// SHA-256
#[inline]
pub fn sha256(input: &[u8]) -> H256 {
	let mut result = H256::default();
	result.copy_from_slice(&Sha256::digest(input));
	result
}

/// SHA-256 and RIPEMD160
#[inline]
pub fn dhash160(input: &[u8]) -> H160 {
	ripemd160(&*sha256(input))
}

/// SHA-256 and RIPEMD160, reporting a malformed digest instead of assuming its size.
pub fn checked_dhash160(input: &[u8]) -> Result<H160, Error> {
	let inner = Sha256::digest(input);
	let outer = Ripemd160::digest(&inner);
	H160::from_slice(&outer).ok_or(Error::InvalidDigestLength {
		expected: H160::size(),
		actual: outer.len(),
	})
}
