//! Cloneable callback wrapper.
//!
//! `Callback` lets a parent hand a child component a capability to call back
//! into it. Clones share one allocation, so identity survives cloning and two
//! callbacks compare equal only when they are clones of each other.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_reactive::{Callback, Signal};
//!
//! let value = Signal::new(String::new());
//! let on_change = Callback::new({
//!     let value = value.clone();
//!     move |next: String| value.set(next)
//! });
//!
//! on_change.call("updated".to_string());
//! ```

use std::rc::Rc;

/// A type-safe, cloneable callback.
///
/// The reactive runtime is single-threaded, so the wrapped closure may
/// capture Signals and other `!Send` state.
pub struct Callback<Args, Ret = ()> {
	inner: Rc<dyn Fn(Args) -> Ret + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}

	/// Returns `true` if both callbacks wrap the same closure.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> PartialEq for Callback<Args, Ret> {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl<Args, Ret> std::fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_callback_call() {
		let add_one = Callback::new(|x: i32| x + 1);

		assert_eq!(add_one.call(5), 6);
	}

	#[rstest]
	fn test_clone_shares_identity() {
		let hits = Rc::new(Cell::new(0));
		let callback = Callback::new({
			let hits = Rc::clone(&hits);
			move |_: ()| hits.set(hits.get() + 1)
		});
		let clone = callback.clone();

		clone.call(());

		assert_eq!(hits.get(), 1);
		assert_eq!(callback, clone);
	}

	#[rstest]
	fn test_distinct_closures_are_not_equal() {
		let a: Callback<i32, i32> = Callback::new(|x| x);
		let b: Callback<i32, i32> = Callback::new(|x| x);

		assert_ne!(a, b);
	}
}
