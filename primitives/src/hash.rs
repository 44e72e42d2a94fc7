//! Fixed-size hashes

use std::{fmt, ops, str};
use hex::{ToHex, FromHex, FromHexError};

macro_rules! impl_hash {
	($name: ident, $size: expr) => {
		#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub struct $name([u8; $size]);

		impl Default for $name {
			fn default() -> Self {
				$name([0u8; $size])
			}
		}

		impl From<[u8; $size]> for $name {
			fn from(h: [u8; $size]) -> Self {
				$name(h)
			}
		}

		impl From<$name> for [u8; $size] {
			fn from(h: $name) -> Self {
				h.0
			}
		}

		impl From<&'static str> for $name {
			fn from(s: &'static str) -> Self {
				s.parse().unwrap_or_default()
			}
		}

		impl str::FromStr for $name {
			type Err = FromHexError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				let vec: Vec<u8> = s.from_hex()?;
				$name::from_slice(&vec).ok_or(FromHexError::InvalidHexLength)
			}
		}

		impl fmt::Debug for $name {
			fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str(&self.0.to_hex::<String>())
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str(&self.0.to_hex::<String>())
			}
		}

		impl ops::Deref for $name {
			type Target = [u8; $size];

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}

		impl ops::DerefMut for $name {
			fn deref_mut(&mut self) -> &mut Self::Target {
				&mut self.0
			}
		}

		impl $name {
			/// Copies `slice` into a new hash; `None` unless the lengths match exactly.
			pub fn from_slice(slice: &[u8]) -> Option<Self> {
				if slice.len() != $size {
					return None;
				}
				let mut inner = [0u8; $size];
				inner.copy_from_slice(slice);
				Some($name(inner))
			}

			pub fn size() -> usize {
				$size
			}
		}
	}
}

impl_hash!(H160, 20);
impl_hash!(H256, 32);
