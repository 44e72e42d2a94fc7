use bytes::Bytes;
use {
	Error, Script, DecodedScript, Stack, VerificationFlags, SignatureChecker, MockSignatureChecker,
	TraceSink, LogTraceSink, eval_script, eval_script_traced,
};

/// Lifecycle of a `ScriptEvaluator`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EvaluatorState {
	/// No script pair supplied yet.
	Unconfigured,
	/// Both scripts decoded, ready to evaluate.
	Configured,
	/// At least one evaluation finished; evaluating again replays the same pair.
	Evaluated,
}

/// Runs an unlocking script followed by a locking script against one shared
/// stack and turns the outcome into a verdict.
///
/// Only configuration problems are reported as errors. A script pair failing
/// its own conditions evaluates to `false`.
pub struct ScriptEvaluator {
	stack: Stack<Bytes>,
	flags: VerificationFlags,
	checker: Box<dyn SignatureChecker>,
	trace_sink: Option<Box<dyn TraceSink>>,
	unlocking: Option<DecodedScript>,
	locking: Option<DecodedScript>,
	state: EvaluatorState,
}

impl Default for ScriptEvaluator {
	fn default() -> Self {
		ScriptEvaluator {
			stack: Stack::new(),
			flags: VerificationFlags::default(),
			checker: Box::new(MockSignatureChecker),
			trace_sink: None,
			unlocking: None,
			locking: None,
			state: EvaluatorState::Unconfigured,
		}
	}
}

impl ScriptEvaluator {
	pub fn new() -> Self {
		ScriptEvaluator::default()
	}

	/// Flags used to decode scripts passed to `configure`.
	pub fn with_flags(mut self, flags: VerificationFlags) -> Self {
		self.flags = flags;
		self
	}

	/// Replaces the signature checker consulted by `OP_CHECKSIG`.
	pub fn with_checker<C>(mut self, checker: C) -> Self where C: SignatureChecker + 'static {
		self.checker = Box::new(checker);
		self
	}

	/// Registers the sink receiving steps of traced evaluations.
	pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
		self.trace_sink = Some(sink);
	}

	pub fn take_trace_sink(&mut self) -> Option<Box<dyn TraceSink>> {
		self.trace_sink.take()
	}

	pub fn flags(&self) -> &VerificationFlags {
		&self.flags
	}

	pub fn state(&self) -> EvaluatorState {
		self.state
	}

	/// Stack left behind by the last evaluation.
	pub fn stack(&self) -> &Stack<Bytes> {
		&self.stack
	}

	/// Forgets the configured script pair and the last stack.
	pub fn reset(&mut self) {
		self.unlocking = None;
		self.locking = None;
		self.stack.clear();
		self.state = EvaluatorState::Unconfigured;
	}

	/// Decodes both raw scripts and makes the evaluator ready.
	///
	/// A script that fails to decode is reported here and never evaluated; the
	/// evaluator is left unconfigured.
	pub fn configure(&mut self, unlocking: &[u8], locking: &[u8]) -> Result<(), Error> {
		self.reset();

		let unlocking = Script::from(unlocking).decode(&self.flags).map_err(|err| {
			debug!(target: "script", "failed to decode unlocking script: {}", err);
			err
		})?;
		let locking = Script::from(locking);
		let p2pkh = locking.is_pay_to_public_key_hash();
		let locking = locking.decode(&self.flags).map_err(|err| {
			debug!(target: "script", "failed to decode locking script: {}", err);
			err
		})?;
		debug!(target: "script", "configured script pair, p2pkh locking script: {}", p2pkh);

		self.configure_decoded(unlocking, locking);
		Ok(())
	}

	/// Supplies an already decoded script pair.
	pub fn configure_decoded(&mut self, unlocking: DecodedScript, locking: DecodedScript) {
		self.stack.clear();
		self.unlocking = Some(unlocking);
		self.locking = Some(locking);
		self.state = EvaluatorState::Configured;
	}

	/// Evaluates the configured pair.
	///
	/// With `trace_enabled` every applied opcode is reported to the registered
	/// sink, or to the log when none is registered. Fails only with `NotReady`.
	pub fn evaluate(&mut self, trace_enabled: bool) -> Result<bool, Error> {
		if !trace_enabled {
			return self.evaluate_with(None::<&mut LogTraceSink>);
		}

		match self.trace_sink.take() {
			Some(mut sink) => {
				let result = self.evaluate_with(Some(&mut *sink));
				self.trace_sink = Some(sink);
				result
			},
			None => self.evaluate_with(Some(&mut LogTraceSink)),
		}
	}

	/// Evaluates the configured pair, reporting every applied opcode to `trace`.
	pub fn evaluate_traced(&mut self, trace: &mut dyn TraceSink) -> Result<bool, Error> {
		self.evaluate_with(Some(trace))
	}

	fn evaluate_with<T: TraceSink + ?Sized>(&mut self, trace: Option<&mut T>) -> Result<bool, Error> {
		let (unlocking, locking) = match (self.unlocking.as_ref(), self.locking.as_ref()) {
			(Some(unlocking), Some(locking)) => (unlocking, locking),
			_ => {
				warn!(target: "script", "evaluate called before both scripts were configured");
				return Err(Error::NotReady);
			},
		};

		debug!(target: "script", "evaluating {} unlocking and {} locking opcodes", unlocking.len(), locking.len());

		self.stack.clear();
		let result = run_phases(&mut self.stack, unlocking, locking, &*self.checker, trace);
		self.state = EvaluatorState::Evaluated;

		Ok(result.is_ok() && is_true(&self.stack))
	}
}

fn run_phases<T: TraceSink + ?Sized>(
	stack: &mut Stack<Bytes>,
	unlocking: &DecodedScript,
	locking: &DecodedScript,
	checker: &dyn SignatureChecker,
	mut trace: Option<&mut T>,
) -> Result<(), Error> {
	for &(phase, script) in &[("unlocking", unlocking), ("locking", locking)] {
		let result = match trace {
			Some(ref mut trace) => eval_script_traced(stack, script, checker, &mut **trace),
			None => eval_script(stack, script, checker),
		};

		if let Err(err) = result {
			debug!(target: "script", "{} script failed, verdict is false: {}", phase, err);
			return Err(err);
		}
	}

	Ok(())
}

/// Exactly one element, equal to the single byte 1.
fn is_true(stack: &Stack<Bytes>) -> bool {
	stack.len() == 1 && stack.peek().map(|top| &top[..] == &[1u8][..]).unwrap_or(false)
}


#[cfg(test)]
mod property_tests {
	use proptest::prelude::*;
	use {Opcode, VerificationFlags, LengthPrefix, ExecutionTrace};
	use super::{ScriptEvaluator, EvaluatorState};

	/// Mostly mapped opcode bytes, so that a fair share of scripts decode.
	fn script_bytes() -> BoxedStrategy<Vec<u8>> {
		let mapped: Vec<u8> = (0..=255u8).filter(|b| Opcode::from_u8(*b).is_some()).collect();
		prop::collection::vec(
			prop_oneof![
				3 => prop::sample::select(mapped),
				1 => any::<u8>(),
			],
			0..48,
		).boxed()
	}

	proptest! {
		#[test]
		fn prop_evaluate_never_fails_once_configured(
			unlocking in script_bytes(),
			locking in script_bytes(),
			little_endian in any::<bool>(),
			trace_enabled in any::<bool>()
		) {
			let length_prefix = if little_endian { LengthPrefix::LittleEndian } else { LengthPrefix::ByteSum };
			let mut evaluator = ScriptEvaluator::new()
				.with_flags(VerificationFlags::default().length_prefix(length_prefix));
			if trace_enabled {
				evaluator.set_trace_sink(Box::new(ExecutionTrace::new()));
			}

			match evaluator.configure(&unlocking, &locking) {
				Ok(()) => {
					let verdict = evaluator.evaluate(trace_enabled);
					prop_assert!(verdict.is_ok());
					prop_assert_eq!(evaluator.state(), EvaluatorState::Evaluated);
					if verdict == Ok(true) {
						prop_assert_eq!(evaluator.stack().len(), 1);
					}
				},
				Err(err) => {
					prop_assert!(err.is_decode());
					prop_assert_eq!(evaluator.state(), EvaluatorState::Unconfigured);
				},
			}
		}
	}
}
