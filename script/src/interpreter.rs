use std::collections::VecDeque;
use bytes::Bytes;
use crypto;
use {Opcode, Error, Stack, DecodedScript, SignatureChecker, TraceSink};

/// Applies a single opcode to the stack.
///
/// `payload` is the data carried by a push data opcode; it is ignored by every
/// other opcode. On failure the stack may have lost the operands of `opcode`.
pub fn execute_opcode(
	stack: &mut Stack<Bytes>,
	opcode: Opcode,
	payload: Option<Bytes>,
	checker: &dyn SignatureChecker,
) -> Result<(), Error> {
	match opcode {
		Opcode::OP_0 |
		Opcode::OP_1 |
		Opcode::OP_2 |
		Opcode::OP_3 |
		Opcode::OP_4 |
		Opcode::OP_5 |
		Opcode::OP_6 |
		Opcode::OP_7 |
		Opcode::OP_8 |
		Opcode::OP_9 |
		Opcode::OP_10 |
		Opcode::OP_11 |
		Opcode::OP_12 |
		Opcode::OP_13 |
		Opcode::OP_14 |
		Opcode::OP_15 |
		Opcode::OP_16 => {
			let value = opcode.decode_op_n().unwrap_or(0);
			stack.push(vec![value].into());
		},
		Opcode::OP_PUSHDATA1 |
		Opcode::OP_PUSHDATA2 |
		Opcode::OP_PUSHDATA4 => {
			let data = payload.ok_or(Error::MissingPayload)?;
			stack.push(data);
		},
		Opcode::OP_DUP => {
			stack.dup(1)?;
		},
		Opcode::OP_DROP => {
			stack.require(1)?;
			stack.pop()?;
		},
		Opcode::OP_EQUAL => {
			stack.require(2)?;
			let v1 = stack.pop()?;
			let v2 = stack.pop()?;
			stack.push(bool_to_bytes(v1 == v2));
		},
		Opcode::OP_EQUALVERIFY => {
			stack.require(2)?;
			let v1 = stack.pop()?;
			let v2 = stack.pop()?;
			if v1 != v2 {
				return Err(Error::ScriptFailure);
			}
		},
		Opcode::OP_HASH160 => {
			stack.require(1)?;
			let v = stack.pop()?;
			let hash = crypto::checked_dhash160(&v).map_err(Error::Hashing)?;
			stack.push(hash.to_vec().into());
		},
		Opcode::OP_CHECKSIG => {
			stack.require(2)?;
			let pubkey = stack.pop()?;
			let signature = stack.pop()?;
			let success = checker.check_signature(&signature, &pubkey);
			stack.push(bool_to_bytes(success));
		},
	}

	Ok(())
}

/// Executes a decoded script against `stack`.
///
/// Push data opcodes take their payloads from `script` only, first in first out.
/// Execution stops at the first failing opcode.
pub fn eval_script(
	stack: &mut Stack<Bytes>,
	script: &DecodedScript,
	checker: &dyn SignatureChecker,
) -> Result<(), Error> {
	run::<dyn TraceSink>(stack, script, checker, None)
}

/// Like `eval_script`, reporting the stack to `trace` after every applied opcode.
pub fn eval_script_traced<T: TraceSink + ?Sized>(
	stack: &mut Stack<Bytes>,
	script: &DecodedScript,
	checker: &dyn SignatureChecker,
	trace: &mut T,
) -> Result<(), Error> {
	run(stack, script, checker, Some(trace))
}

fn run<T: TraceSink + ?Sized>(
	stack: &mut Stack<Bytes>,
	script: &DecodedScript,
	checker: &dyn SignatureChecker,
	mut trace: Option<&mut T>,
) -> Result<(), Error> {
	let mut payloads: VecDeque<Bytes> = script.payloads().iter().cloned().collect();

	for opcode in script.opcodes() {
		let payload = if opcode.is_push_data() {
			payloads.pop_front()
		} else {
			None
		};

		execute_opcode(stack, *opcode, payload, checker)?;

		if let Some(ref mut trace) = trace {
			trace.on_step(*opcode, stack);
		}
	}

	Ok(())
}

#[inline]
fn bool_to_bytes(value: bool) -> Bytes {
	if value {
		vec![1].into()
	} else {
		vec![0].into()
	}
}
