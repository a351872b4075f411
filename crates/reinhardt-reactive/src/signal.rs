//! Signal - Fine-grained Reactive Primitive
//!
//! `Signal<T>` holds a value and records a dependency whenever it is read from
//! inside an Effect. Writing to it queues those Effects.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_reactive::Signal;
//!
//! let count = Signal::new(0);
//! count.set(42);
//! assert_eq!(count.get(), 42);
//!
//! // Only notifies when the value actually differs
//! assert!(!count.set_if_changed(42));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::runtime::{NodeId, try_with_runtime, with_runtime};

/// A reactive value shared between clones.
///
/// All clones of a Signal point at the same value. The node is removed from
/// the runtime when the last clone is dropped.
pub struct Signal<T: 'static> {
	id: NodeId,
	value: Rc<RefCell<T>>,
}

impl<T: 'static> Signal<T> {
	/// Create a new Signal with the given initial value
	pub fn new(value: T) -> Self {
		Self {
			id: NodeId::new(),
			value: Rc::new(RefCell::new(value)),
		}
	}

	/// Read the value, tracking the dependency when called inside an Effect
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		with_runtime(|rt| rt.track_dependency(self.id));
		self.get_untracked()
	}

	/// Read the value without tracking
	pub fn get_untracked(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Borrow the value for the duration of `f`, tracking the dependency
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		with_runtime(|rt| rt.track_dependency(self.id));
		f(&self.value.borrow())
	}

	/// Replace the value and notify dependents unconditionally
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	/// Replace the value only when it differs from the current one.
	///
	/// Returns `true` if the value changed and dependents were notified.
	pub fn set_if_changed(&self, value: T) -> bool
	where
		T: PartialEq,
	{
		if *self.value.borrow() == value {
			return false;
		}
		self.set(value);
		true
	}

	/// Mutate the value in place and notify dependents once
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut *self.value.borrow_mut());
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	/// NodeId of this signal
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			value: Rc::clone(&self.value),
		}
	}
}

impl<T: 'static> Drop for Signal<T> {
	fn drop(&mut self) {
		if Rc::strong_count(&self.value) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("id", &self.id)
			.field("value", &*self.value.borrow())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_signal_set_and_clone_share_value() {
		let signal = Signal::new(0);
		let clone = signal.clone();

		signal.set(100);

		assert_eq!(clone.get_untracked(), 100);
	}

	#[test]
	#[serial]
	fn test_signal_update() {
		let signal = Signal::new(1);

		signal.update(|n| *n *= 3);

		assert_eq!(signal.get_untracked(), 3);
	}

	#[test]
	#[serial]
	fn test_set_if_changed_skips_equal_value() {
		let signal = Signal::new(String::from("quantity"));

		assert!(!signal.set_if_changed(String::from("quantity")));
		assert!(signal.set_if_changed(String::from("price")));
		assert_eq!(signal.get_untracked(), "price");
	}

	#[test]
	#[serial]
	fn test_tracked_read_inside_observer() {
		let signal = Signal::new(7);
		let observer = NodeId::new();

		with_runtime(|rt| rt.push_observer(observer));
		let _ = signal.get();
		with_runtime(|rt| rt.pop_observer());

		assert_eq!(with_runtime(|rt| rt.subscriber_count(signal.id())), 1);
		with_runtime(|rt| rt.remove_node(observer));
	}

	#[test]
	#[serial]
	fn test_last_clone_removes_node() {
		let signal = Signal::new(0);
		let id = signal.id();
		let observer = NodeId::new();

		with_runtime(|rt| rt.push_observer(observer));
		let _ = signal.get();
		with_runtime(|rt| rt.pop_observer());
		assert!(with_runtime(|rt| rt.has_node(id)));

		drop(signal);

		assert!(!with_runtime(|rt| rt.has_node(id)));
		with_runtime(|rt| rt.remove_node(observer));
	}
}
