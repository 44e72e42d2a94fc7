#[macro_use]
extern crate log;
extern crate bitcrypto as crypto;
extern crate primitives;

#[cfg(test)]
#[macro_use]
extern crate proptest;

mod builder;
mod error;
mod evaluator;
mod flags;
mod interpreter;
mod opcode;
mod script;
mod stack;
mod trace;
mod verify;

pub use primitives::{bytes, hash};

pub use self::builder::Builder;
pub use self::error::Error;
pub use self::evaluator::{ScriptEvaluator, EvaluatorState};
pub use self::flags::{VerificationFlags, LengthPrefix};
pub use self::interpreter::{eval_script, eval_script_traced, execute_opcode};
pub use self::opcode::Opcode;
pub use self::script::{Script, DecodedScript, Instruction, Instructions};
pub use self::stack::Stack;
pub use self::trace::{TraceSink, LogTraceSink, ExecutionTrace, TraceStep};
pub use self::verify::{SignatureChecker, MockSignatureChecker, NoopSignatureChecker};
