/// Checks a signature against a public key.
///
/// `OP_CHECKSIG` only ever talks to this trait, so real signature verification
/// can replace the mock without touching the interpreter.
pub trait SignatureChecker {
	fn check_signature(&self, signature: &[u8], public: &[u8]) -> bool;
}

/// Accepts a signature iff it is byte-for-byte equal to the public key.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockSignatureChecker;

impl SignatureChecker for MockSignatureChecker {
	fn check_signature(&self, signature: &[u8], public: &[u8]) -> bool {
		signature == public
	}
}

/// Rejects every signature.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSignatureChecker;

impl SignatureChecker for NoopSignatureChecker {
	fn check_signature(&self, _: &[u8], _: &[u8]) -> bool {
		false
	}
}
