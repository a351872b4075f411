//! Reactive Runtime
//!
//! The runtime owns the dependency graph between Signals and the Effects that
//! read them, plus the queue of Effects waiting to re-run.
//!
//! ## Architecture
//!
//! 1. **Observer Stack**: the Effect currently executing sits on top of the stack
//! 2. **Dependency Tracking**: `Signal::get()` records an edge to the current observer
//! 3. **Update Queue**: `Signal::set()` queues every subscriber exactly once
//! 4. **Flush**: queued Effects run when [`flush_effects`] is called, either by an
//!    installed scheduler or manually (tests, non-browser hosts)
//!
//! The runtime is thread-local. A UI tree lives on a single thread, so each
//! thread gets an independent graph.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Unique identifier for reactive nodes (Signals and Effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Create a new unique NodeId
	pub fn new() -> Self {
		static COUNTER: AtomicUsize = AtomicUsize::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

/// Edges of a single node in the dependency graph
#[derive(Debug, Default)]
pub(crate) struct DependencyNode {
	/// Nodes that re-run when this node changes
	pub(crate) subscribers: Vec<NodeId>,
	/// Nodes this node read during its last run
	pub(crate) dependencies: Vec<NodeId>,
}

type SchedulerFn = Box<dyn Fn(Box<dyn FnOnce() + Send>) + Send + Sync>;

static SCHEDULER: OnceLock<SchedulerFn> = OnceLock::new();

/// Installs the process-wide scheduler used to flush queued Effects.
///
/// Only the first call wins. Browser hosts typically spawn a microtask here;
/// without a scheduler, queued Effects wait for a manual [`flush_effects`].
///
/// # Example
///
/// ```ignore
/// reinhardt_reactive::set_scheduler(|task| {
///     wasm_bindgen_futures::spawn_local(async move { task() });
/// });
/// ```
pub fn set_scheduler<F>(scheduler: F)
where
	F: Fn(Box<dyn FnOnce() + Send>) + Send + Sync + 'static,
{
	if SCHEDULER.set(Box::new(scheduler)).is_err() {
		tracing::debug!("reactive scheduler already installed, ignoring replacement");
	}
}

/// Thread-local reactive runtime
pub struct Runtime {
	observer_stack: RefCell<Vec<NodeId>>,
	pub(crate) dependency_graph: RefCell<BTreeMap<NodeId, DependencyNode>>,
	pub(crate) pending_updates: RefCell<Vec<NodeId>>,
	flush_scheduled: Cell<bool>,
	flushing: Cell<bool>,
}

impl Runtime {
	/// Create an empty runtime
	pub fn new() -> Self {
		Self {
			observer_stack: RefCell::new(Vec::new()),
			dependency_graph: RefCell::new(BTreeMap::new()),
			pending_updates: RefCell::new(Vec::new()),
			flush_scheduled: Cell::new(false),
			flushing: Cell::new(false),
		}
	}

	/// The Effect currently executing, if any
	pub fn current_observer(&self) -> Option<NodeId> {
		self.observer_stack.borrow().last().copied()
	}

	/// Push an observer before running an Effect
	pub fn push_observer(&self, observer: NodeId) {
		self.observer_stack.borrow_mut().push(observer);
	}

	/// Pop the observer once the Effect has finished
	pub fn pop_observer(&self) -> Option<NodeId> {
		self.observer_stack.borrow_mut().pop()
	}

	/// Record that the current observer read `signal_id`
	pub fn track_dependency(&self, signal_id: NodeId) {
		let Some(observer_id) = self.current_observer() else {
			return;
		};
		let mut graph = self.dependency_graph.borrow_mut();

		let signal_node = graph.entry(signal_id).or_default();
		if !signal_node.subscribers.contains(&observer_id) {
			signal_node.subscribers.push(observer_id);
		}

		let observer_node = graph.entry(observer_id).or_default();
		if !observer_node.dependencies.contains(&signal_id) {
			observer_node.dependencies.push(signal_id);
		}
	}

	/// Queue every subscriber of `signal_id` for re-execution
	pub fn notify_signal_change(&self, signal_id: NodeId) {
		let subscribers = match self.dependency_graph.borrow().get(&signal_id) {
			Some(node) => node.subscribers.clone(),
			None => return,
		};
		for subscriber in subscribers {
			self.schedule_update(subscriber);
		}
	}

	/// Queue a node, keeping insertion order and skipping duplicates
	pub fn schedule_update(&self, node_id: NodeId) {
		{
			let mut pending = self.pending_updates.borrow_mut();
			if pending.contains(&node_id) {
				return;
			}
			pending.push(node_id);
		}

		if self.flush_scheduled.replace(true) {
			return;
		}
		if let Some(scheduler) = SCHEDULER.get() {
			scheduler(Box::new(|| {
				flush_effects();
			}));
		}
	}

	/// Take the current queue, leaving it empty
	pub(crate) fn take_pending(&self) -> Vec<NodeId> {
		self.flush_scheduled.set(false);
		std::mem::take(&mut *self.pending_updates.borrow_mut())
	}

	/// Marks the start of a flush. Returns `false` if one is already running.
	pub(crate) fn begin_flush(&self) -> bool {
		!self.flushing.replace(true)
	}

	/// Marks the end of a flush and hands leftover work to the scheduler.
	///
	/// Work queued during the flush whose flush request was not honored is
	/// passed to the scheduler again, or kept for the next manual flush.
	pub(crate) fn end_flush(&self) {
		self.flushing.set(false);
		if self.pending_updates.borrow().is_empty() || self.flush_scheduled.get() {
			return;
		}
		if let Some(scheduler) = SCHEDULER.get() {
			self.flush_scheduled.set(true);
			scheduler(Box::new(|| {
				flush_effects();
			}));
		}
	}

	/// Whether a flush (or an Effect's first run) is in progress
	pub fn is_flushing(&self) -> bool {
		self.flushing.get()
	}

	/// Drop every edge from `node_id` to the signals it read
	pub fn clear_dependencies(&self, node_id: NodeId) {
		let mut graph = self.dependency_graph.borrow_mut();

		let dependencies = match graph.get_mut(&node_id) {
			Some(node) => std::mem::take(&mut node.dependencies),
			None => return,
		};
		for dep_id in dependencies {
			if let Some(dep_node) = graph.get_mut(&dep_id) {
				dep_node.subscribers.retain(|&id| id != node_id);
			}
		}
	}

	/// Remove a node entirely (called when a Signal or Effect is dropped)
	pub fn remove_node(&self, node_id: NodeId) {
		self.clear_dependencies(node_id);
		self.dependency_graph.borrow_mut().remove(&node_id);
		self.pending_updates.borrow_mut().retain(|&id| id != node_id);
	}

	/// Check if a node exists in the dependency graph (for testing)
	pub fn has_node(&self, node_id: NodeId) -> bool {
		self.dependency_graph.borrow().contains_key(&node_id)
	}

	/// Number of subscribers of a node (for testing)
	pub fn subscriber_count(&self, node_id: NodeId) -> usize {
		self.dependency_graph
			.borrow()
			.get(&node_id)
			.map(|node| node.subscribers.len())
			.unwrap_or(0)
	}

	/// Number of queued nodes (for testing)
	pub fn pending_count(&self) -> usize {
		self.pending_updates.borrow().len()
	}
}

impl Default for Runtime {
	fn default() -> Self {
		Self::new()
	}
}

thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Run `f` against this thread's runtime
pub fn with_runtime<F, R>(f: F) -> R
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.with(f)
}

/// Like [`with_runtime`], but returns `None` once thread-local storage is torn down
pub(crate) fn try_with_runtime<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.try_with(f).ok()
}

/// Runs `f` with dependency tracking switched off.
///
/// Signals read inside `f` are not recorded against the Effect that is
/// currently running, if any.
pub fn untrack<F, R>(f: F) -> R
where
	F: FnOnce() -> R,
{
	let saved = with_runtime(|rt| std::mem::take(&mut *rt.observer_stack.borrow_mut()));
	let result = f();
	with_runtime(|rt| {
		let mut stack = rt.observer_stack.borrow_mut();
		let nested = std::mem::replace(&mut *stack, saved);
		stack.extend(nested);
	});
	result
}

/// Runs every queued Effect once, in queue order.
///
/// Effects queued while flushing (for example by an Effect that writes to a
/// Signal it also reads) wait for the next flush, which an installed scheduler
/// is asked for once this one finishes. Returns how many Effects ran.
///
/// Calling this while a flush is already running does nothing and returns 0;
/// the queue is left for the running flush to hand off.
pub fn flush_effects() -> usize {
	let started = with_runtime(|rt| {
		if rt.begin_flush() {
			return true;
		}
		rt.flush_scheduled.set(false);
		false
	});
	if !started {
		tracing::debug!("flush requested while flushing, deferring");
		return 0;
	}

	let pending = with_runtime(|rt| rt.take_pending());
	let count = pending.len();
	for node_id in pending {
		crate::effect::Effect::execute_effect(node_id);
	}
	with_runtime(|rt| rt.end_flush());
	count
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_node_id_uniqueness() {
		let id1 = NodeId::new();
		let id2 = NodeId::new();

		assert_ne!(id1, id2);
	}

	#[rstest]
	fn test_observer_stack() {
		let runtime = Runtime::new();
		let outer = NodeId::new();
		let inner = NodeId::new();

		assert!(runtime.current_observer().is_none());
		runtime.push_observer(outer);
		runtime.push_observer(inner);
		assert_eq!(runtime.current_observer(), Some(inner));
		runtime.pop_observer();
		assert_eq!(runtime.current_observer(), Some(outer));
		runtime.pop_observer();
		assert!(runtime.current_observer().is_none());
	}

	#[rstest]
	fn test_track_without_observer_is_noop() {
		let runtime = Runtime::new();
		let signal_id = NodeId::new();

		runtime.track_dependency(signal_id);

		assert!(!runtime.has_node(signal_id));
	}

	#[rstest]
	fn test_notify_queues_each_subscriber_once() {
		let runtime = Runtime::new();
		let signal_id = NodeId::new();
		let effect_id = NodeId::new();

		runtime.push_observer(effect_id);
		runtime.track_dependency(signal_id);
		runtime.pop_observer();

		runtime.notify_signal_change(signal_id);
		runtime.notify_signal_change(signal_id);

		assert_eq!(runtime.pending_count(), 1);
		assert_eq!(runtime.take_pending(), vec![effect_id]);
		assert_eq!(runtime.pending_count(), 0);
	}

	#[rstest]
	fn test_clear_dependencies() {
		let runtime = Runtime::new();
		let signal_id = NodeId::new();
		let effect_id = NodeId::new();

		runtime.push_observer(effect_id);
		runtime.track_dependency(signal_id);
		runtime.pop_observer();
		assert_eq!(runtime.subscriber_count(signal_id), 1);

		runtime.clear_dependencies(effect_id);

		assert_eq!(runtime.subscriber_count(signal_id), 0);
	}

	#[rstest]
	fn test_untrack_hides_current_observer() {
		let observer = NodeId::new();
		with_runtime(|rt| rt.push_observer(observer));

		let inside = untrack(|| with_runtime(|rt| rt.current_observer()));

		assert_eq!(inside, None);
		assert_eq!(with_runtime(|rt| rt.pop_observer()), Some(observer));
	}

	#[rstest]
	fn test_begin_flush_is_exclusive() {
		let runtime = Runtime::new();

		assert!(runtime.begin_flush());
		assert!(runtime.is_flushing());
		assert!(!runtime.begin_flush());

		runtime.end_flush();
		assert!(!runtime.is_flushing());
	}

	#[rstest]
	fn test_remove_node_drops_pending_entry() {
		let runtime = Runtime::new();
		let effect_id = NodeId::new();

		runtime.schedule_update(effect_id);
		runtime.remove_node(effect_id);

		assert_eq!(runtime.pending_count(), 0);
	}
}
