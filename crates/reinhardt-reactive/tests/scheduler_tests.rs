//! Flushing through an installed scheduler.
//!
//! The scheduler is process-wide, so these tests live in their own binary.

use reinhardt_reactive::{Effect, Signal, flush_effects, set_scheduler, with_runtime};
use serial_test::serial;
use std::cell::Cell;
use std::rc::Rc;

fn install_synchronous_scheduler() {
	set_scheduler(|task| task());
}

#[test]
#[serial]
fn test_synchronous_scheduler_reaches_fixed_point() {
	install_synchronous_scheduler();
	let signal = Signal::new(3);
	let runs = Rc::new(Cell::new(0));

	let _effect = Effect::new({
		let signal = signal.clone();
		let runs = Rc::clone(&runs);
		move || {
			runs.set(runs.get() + 1);
			let value = signal.get();
			if value > 0 {
				signal.set(value - 1);
			}
		}
	});

	assert_eq!(signal.get_untracked(), 0);
	assert_eq!(runs.get(), 4);
	assert_eq!(flush_effects(), 0);
	assert_eq!(with_runtime(|rt| rt.pending_count()), 0);
}

#[test]
#[serial]
fn test_synchronous_scheduler_flushes_on_write() {
	install_synchronous_scheduler();
	let signal = Signal::new(String::from("quantity"));
	let seen = Rc::new(Cell::new(0));

	let _effect = Effect::new({
		let signal = signal.clone();
		let seen = Rc::clone(&seen);
		move || seen.set(signal.get().len())
	});

	signal.set(String::from("price_in_cents"));

	assert_eq!(seen.get(), 14);
	assert!(!with_runtime(|rt| rt.is_flushing()));
}
