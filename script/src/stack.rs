use std::{fmt, iter, slice};
use Error;

/// LIFO stack of script elements.
///
/// Elements are kept bottom first; the logical top is the last element of the
/// backing vector.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Stack<T> {
	data: Vec<T>,
}

impl<T> From<Vec<T>> for Stack<T> {
	/// Builds a stack from elements listed bottom first.
	fn from(v: Vec<T>) -> Self {
		Stack {
			data: v
		}
	}
}

impl<T> Stack<T> {
	#[inline]
	pub fn new() -> Self {
		Stack {
			data: Vec::new()
		}
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.data.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	#[inline]
	pub fn clear(&mut self) {
		self.data.clear()
	}

	/// Fails with `StackUnderflow` unless at least `len` elements are present.
	#[inline]
	pub fn require(&self, len: usize) -> Result<(), Error> {
		if self.data.len() < len {
			return Err(Error::StackUnderflow);
		}
		Ok(())
	}

	#[inline]
	pub fn peek(&self) -> Result<&T, Error> {
		self.data.last().ok_or(Error::EmptyStack)
	}

	#[inline]
	pub fn pop(&mut self) -> Result<T, Error> {
		self.data.pop().ok_or(Error::EmptyStack)
	}

	#[inline]
	pub fn push(&mut self, value: T) {
		self.data.push(value)
	}

	/// Duplicates the top `i` elements, preserving their order.
	pub fn dup(&mut self, i: usize) -> Result<(), Error> where T: Clone {
		self.require(i)?;
		let mut j = i;
		while j > 0 {
			let v = self.data[self.data.len() - i].clone();
			self.data.push(v);
			j -= 1;
		}
		Ok(())
	}

	/// Iterates from the most recently pushed element down to the bottom.
	pub fn iter_top_down(&self) -> iter::Rev<slice::Iter<T>> {
		self.data.iter().rev()
	}

	/// Copy of the stack contents, top first.
	pub fn snapshot(&self) -> Vec<T> where T: Clone {
		self.iter_top_down().cloned().collect()
	}
}

impl<T> fmt::Display for Stack<T> where T: fmt::Display {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for item in self.iter_top_down() {
			writeln!(f, "{}", item)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use bytes::Bytes;
	use Error;
	use super::Stack;

	#[test]
	fn test_stack_require() {
		let stack: Stack<u8> = vec![].into();
		assert_eq!(stack.require(0), Ok(()));
		assert_eq!(stack.require(1), Err(Error::StackUnderflow));
		let stack: Stack<u8> = vec![0].into();
		assert_eq!(stack.require(0), Ok(()));
		assert_eq!(stack.require(1), Ok(()));
		assert_eq!(stack.require(2), Err(Error::StackUnderflow));
		let stack: Stack<u8> = vec![0, 5].into();
		assert_eq!(stack.require(2), Ok(()));
		assert_eq!(stack.require(3), Err(Error::StackUnderflow));
	}

	#[test]
	fn test_stack_peek() {
		let stack: Stack<u8> = vec![].into();
		assert_eq!(stack.peek(), Err(Error::EmptyStack));
		let stack: Stack<u8> = vec![0].into();
		assert_eq!(stack.peek(), Ok(&0));
		let stack: Stack<u8> = vec![0, 5].into();
		assert_eq!(stack.peek(), Ok(&5));
		assert_eq!(stack.len(), 2);
	}

	#[test]
	fn test_stack_pop() {
		let mut stack: Stack<u8> = vec![].into();
		assert_eq!(stack.pop(), Err(Error::EmptyStack));
		assert_eq!(stack, vec![].into());
		let mut stack: Stack<u8> = vec![0].into();
		assert_eq!(stack.pop(), Ok(0));
		assert_eq!(stack, vec![].into());
		let mut stack: Stack<u8> = vec![0, 5].into();
		assert_eq!(stack.pop(), Ok(5));
		assert_eq!(stack.pop(), Ok(0));
		assert_eq!(stack.pop(), Err(Error::EmptyStack));
		assert!(stack.is_empty());
	}

	#[test]
	fn test_stack_push() {
		let mut stack: Stack<u8> = vec![].into();
		stack.push(0);
		assert_eq!(stack, vec![0].into());
		stack.push(5);
		assert_eq!(stack, vec![0, 5].into());
		assert_eq!(stack.len(), 2);
	}

	#[test]
	fn test_stack_dup() {
		let mut stack: Stack<u8> = vec![].into();
		assert_eq!(stack.dup(0), Ok(()));
		assert_eq!(stack.dup(1), Err(Error::StackUnderflow));
		assert_eq!(stack, vec![].into());
		let mut stack: Stack<u8> = vec![0].into();
		assert_eq!(stack.dup(2), Err(Error::StackUnderflow));
		assert_eq!(stack, vec![0].into());
		assert_eq!(stack.dup(1), Ok(()));
		assert_eq!(stack, vec![0, 0].into());
		let mut stack: Stack<u8> = vec![0, 1].into();
		assert_eq!(stack.dup(2), Ok(()));
		assert_eq!(stack, vec![0, 1, 0, 1].into());
	}

	#[test]
	fn test_stack_iter_top_down() {
		let stack: Stack<u8> = vec![1, 2, 3, 4].into();
		assert_eq!(stack.iter_top_down().cloned().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
		assert_eq!(stack.snapshot(), vec![4, 3, 2, 1]);
		assert_eq!(stack, vec![1, 2, 3, 4].into());
	}

	#[test]
	fn test_stack_clear() {
		let mut stack: Stack<u8> = vec![1, 2].into();
		stack.clear();
		assert!(stack.is_empty());
		assert_eq!(stack.peek(), Err(Error::EmptyStack));
	}

	#[test]
	fn test_stack_display() {
		let stack: Stack<Bytes> = vec![vec![0x01].into(), vec![0xab, 0xcd].into()].into();
		assert_eq!(stack.to_string(), "abcd\n01\n");
	}
}
