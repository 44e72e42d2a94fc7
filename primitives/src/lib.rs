extern crate rustc_hex as hex;

pub mod bytes;
pub mod hash;
