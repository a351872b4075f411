//! Effect - Reactive Side Effects
//!
//! An `Effect` runs once when created and is queued again whenever a Signal it
//! read during its last run changes. Queued Effects run on the next
//! [`flush_effects`](crate::flush_effects).
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_reactive::{Effect, Signal, flush_effects};
//!
//! let count = Signal::new(0);
//! let _effect = Effect::new({
//!     let count = count.clone();
//!     move || tracing::info!(count = count.get(), "count changed")
//! });
//!
//! count.set(42);
//! flush_effects(); // logs count = 42
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::runtime::{NodeId, try_with_runtime, with_runtime};

type EffectFn = Rc<RefCell<Box<dyn FnMut() + 'static>>>;

thread_local! {
	static EFFECT_FUNCTIONS: RefCell<BTreeMap<NodeId, EffectFn>> = const { RefCell::new(BTreeMap::new()) };
}

/// Handle to a running effect.
///
/// Dropping the handle disposes the effect.
pub struct Effect {
	id: NodeId,
	disposed: Rc<Cell<bool>>,
}

impl Effect {
	/// Create an Effect and run it immediately
	pub fn new<F>(mut f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		let id = NodeId::new();
		let disposed = Rc::new(Cell::new(false));

		let guard = Rc::clone(&disposed);
		let wrapped: Box<dyn FnMut()> = Box::new(move || {
			if !guard.get() {
				f();
			}
		});
		EFFECT_FUNCTIONS.with(|storage| {
			storage
				.borrow_mut()
				.insert(id, Rc::new(RefCell::new(wrapped)));
		});

		let outermost = with_runtime(|rt| rt.begin_flush());
		Self::execute_effect(id);
		if outermost {
			with_runtime(|rt| rt.end_flush());
		}

		Self { id, disposed }
	}

	/// Re-run an effect by id, re-collecting its dependencies
	pub(crate) fn execute_effect(effect_id: NodeId) {
		// Clone the handle out so the effect may create or drop other effects.
		let Some(effect_fn) =
			EFFECT_FUNCTIONS.with(|storage| storage.borrow().get(&effect_id).cloned())
		else {
			return;
		};
		let Ok(mut run) = effect_fn.try_borrow_mut() else {
			tracing::warn!(?effect_id, "effect re-entered while running, skipping");
			return;
		};

		with_runtime(|rt| {
			rt.clear_dependencies(effect_id);
			rt.push_observer(effect_id);
		});
		(*run)();
		with_runtime(|rt| {
			rt.pop_observer();
		});
	}

	/// NodeId of this effect
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Whether [`dispose`](Self::dispose) has been called
	pub fn is_disposed(&self) -> bool {
		self.disposed.get()
	}

	/// Stop the effect and release its graph node
	pub fn dispose(&self) {
		if self.disposed.replace(true) {
			return;
		}
		let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		let _ = EFFECT_FUNCTIONS.try_with(|storage| {
			storage.borrow_mut().remove(&self.id);
		});
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl std::fmt::Debug for Effect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Effect")
			.field("id", &self.id)
			.field("disposed", &self.disposed.get())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::runtime::{flush_effects, with_runtime};
	use crate::signal::Signal;
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_effect_runs_immediately() {
		let runs = Rc::new(Cell::new(0));

		let _effect = Effect::new({
			let runs = Rc::clone(&runs);
			move || runs.set(runs.get() + 1)
		});

		assert_eq!(runs.get(), 1);
	}

	#[test]
	#[serial]
	fn test_effect_reruns_on_flush() {
		let signal = Signal::new(0);
		let seen = Rc::new(RefCell::new(Vec::new()));

		let _effect = Effect::new({
			let signal = signal.clone();
			let seen = Rc::clone(&seen);
			move || seen.borrow_mut().push(signal.get())
		});

		signal.set(10);
		assert_eq!(*seen.borrow(), vec![0]);

		flush_effects();
		assert_eq!(*seen.borrow(), vec![0, 10]);
	}

	#[test]
	#[serial]
	fn test_batched_changes_run_once() {
		let a = Signal::new(1);
		let b = Signal::new(2);
		let runs = Rc::new(Cell::new(0));

		let _effect = Effect::new({
			let (a, b) = (a.clone(), b.clone());
			let runs = Rc::clone(&runs);
			move || {
				let _ = a.get() + b.get();
				runs.set(runs.get() + 1);
			}
		});

		a.set(10);
		b.set(20);
		assert_eq!(flush_effects(), 1);
		assert_eq!(runs.get(), 2);
	}

	#[test]
	#[serial]
	fn test_disposed_effect_does_not_rerun() {
		let signal = Signal::new(0);
		let runs = Rc::new(Cell::new(0));

		let effect = Effect::new({
			let signal = signal.clone();
			let runs = Rc::clone(&runs);
			move || {
				let _ = signal.get();
				runs.set(runs.get() + 1);
			}
		});
		effect.dispose();

		signal.set(5);
		flush_effects();

		assert!(effect.is_disposed());
		assert_eq!(runs.get(), 1);
	}

	#[test]
	#[serial]
	fn test_nested_flush_keeps_queue_for_next_flush() {
		let signal = Signal::new(0);
		let nested = Rc::new(Cell::new(None));
		let seen = Rc::new(RefCell::new(Vec::new()));

		let _effect = Effect::new({
			let signal = signal.clone();
			let nested = Rc::clone(&nested);
			let seen = Rc::clone(&seen);
			move || {
				let value = signal.get();
				seen.borrow_mut().push(value);
				if value == 1 {
					signal.set(2);
					nested.set(Some(flush_effects()));
				}
			}
		});

		signal.set(1);
		assert_eq!(flush_effects(), 1);
		assert_eq!(nested.get(), Some(0));
		assert_eq!(*seen.borrow(), vec![0, 1]);

		assert_eq!(flush_effects(), 1);
		assert_eq!(*seen.borrow(), vec![0, 1, 2]);
		assert_eq!(with_runtime(|rt| rt.pending_count()), 0);
	}

	#[test]
	#[serial]
	fn test_self_write_is_deferred_to_next_flush() {
		let signal = Signal::new(3);
		let runs = Rc::new(Cell::new(0));

		let _effect = Effect::new({
			let signal = signal.clone();
			let runs = Rc::clone(&runs);
			move || {
				runs.set(runs.get() + 1);
				if signal.get() > 0 {
					signal.set(signal.get_untracked() - 1);
				}
			}
		});

		assert_eq!(runs.get(), 1);
		flush_effects();
		assert_eq!(runs.get(), 2);
		assert_eq!(signal.get_untracked(), 1);
	}
}
