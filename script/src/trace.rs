//! Diagnostic sinks receiving the stack after every applied opcode.

use bytes::Bytes;
use {Opcode, Stack};

/// Receives `(opcode, stack)` after each successfully applied opcode.
///
/// Sinks only observe; nothing they do changes the verdict.
pub trait TraceSink {
	fn on_step(&mut self, opcode: Opcode, stack: &Stack<Bytes>);
}

impl<F> TraceSink for F where F: FnMut(Opcode, &Stack<Bytes>) {
	fn on_step(&mut self, opcode: Opcode, stack: &Stack<Bytes>) {
		self(opcode, stack)
	}
}

/// Writes every step to the `log` facade at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTraceSink;

impl TraceSink for LogTraceSink {
	fn on_step(&mut self, opcode: Opcode, stack: &Stack<Bytes>) {
		let items: Vec<String> = stack.iter_top_down().map(|item| item.to_hex()).collect();
		trace!(target: "script", "{} [{}]", opcode, items.join(", "));
	}
}

/// One recorded step: the opcode and the stack it left, top first.
#[derive(Debug, PartialEq, Clone)]
pub struct TraceStep {
	pub opcode: Opcode,
	pub stack: Vec<Bytes>,
}

/// Records every step in memory.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ExecutionTrace {
	steps: Vec<TraceStep>,
}

impl ExecutionTrace {
	pub fn new() -> Self {
		ExecutionTrace::default()
	}

	pub fn steps(&self) -> &[TraceStep] {
		&self.steps
	}

	/// Identifiers of the recorded opcodes, in execution order.
	pub fn names(&self) -> Vec<&'static str> {
		self.steps.iter().map(|step| step.opcode.name()).collect()
	}

	pub fn len(&self) -> usize {
		self.steps.len()
	}

	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	pub fn clear(&mut self) {
		self.steps.clear()
	}
}

impl TraceSink for ExecutionTrace {
	fn on_step(&mut self, opcode: Opcode, stack: &Stack<Bytes>) {
		self.steps.push(TraceStep {
			opcode: opcode,
			stack: stack.snapshot(),
		});
	}
}
