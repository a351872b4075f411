//! The `ValueDebugger` component.
//!
//! The component watches a `(value, field_name, on_change)` tuple held in
//! Signals. A mounted debugger owns one Effect that re-runs whenever any of
//! the three changes; rendering is computed separately from the same props.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_reactive::{Callback, Signal, flush_effects};
//! use reinhardt_value_debugger::{ObservedValue, ValueDebugger, ValueDebuggerProps};
//!
//! let quantity = Signal::new(ObservedValue::from(3));
//! let on_change = Callback::new({
//!     let quantity = quantity.clone();
//!     move |next: ObservedValue| quantity.set(next)
//! });
//!
//! let props = ValueDebuggerProps::from_signal(quantity.clone(), "quantity").on_change(on_change);
//! let debugger = ValueDebugger::new(props).mount();
//!
//! quantity.set(ObservedValue::from(-1));
//! flush_effects(); // logs the detection and asks the owner to store ""
//! ```

use std::rc::Rc;

use reinhardt_reactive::{Callback, Component, Effect, Page, Signal};

use crate::config::DebuggerConfig;
use crate::overlay::render_overlay;
use crate::sentinel::SentinelState;
use crate::sink::{AutoCorrection, DiagnosticSink, SentinelReport, TracingSink};
use crate::value::ObservedValue;

/// Capability to ask the owner to replace the observed value.
pub type ChangeNotifier = Callback<ObservedValue>;

/// Props of a [`ValueDebugger`].
///
/// Each prop lives in its own Signal so the owner can swap any of them and
/// the mounted effect picks the change up.
#[derive(Debug, Clone)]
pub struct ValueDebuggerProps {
	/// The observed value. Owned by the parent; only read here.
	pub value: Signal<ObservedValue>,
	/// Field identifier used in diagnostics.
	pub field_name: Signal<String>,
	/// Optional notifier used for auto-correction.
	pub on_change: Signal<Option<ChangeNotifier>>,
}

impl ValueDebuggerProps {
	/// Props with fresh Signals for `value` and `field_name` and no notifier.
	pub fn new(value: impl Into<ObservedValue>, field_name: impl Into<String>) -> Self {
		Self::from_signal(Signal::new(value.into()), field_name)
	}

	/// Props observing an existing value Signal.
	pub fn from_signal(value: Signal<ObservedValue>, field_name: impl Into<String>) -> Self {
		Self {
			value,
			field_name: Signal::new(field_name.into()),
			on_change: Signal::new(None),
		}
	}

	/// Sets the change notifier.
	pub fn on_change(self, notifier: ChangeNotifier) -> Self {
		self.on_change.set(Some(notifier));
		self
	}

	/// Replaces the value if it differs. Returns `true` when it changed.
	pub fn set_value(&self, value: impl Into<ObservedValue>) -> bool {
		self.value.set_if_changed(value.into())
	}

	/// Replaces the field name if it differs. Returns `true` when it changed.
	pub fn set_field_name(&self, field_name: impl Into<String>) -> bool {
		self.field_name.set_if_changed(field_name.into())
	}

	/// Replaces the notifier if its identity differs. Returns `true` when it changed.
	pub fn set_on_change(&self, notifier: Option<ChangeNotifier>) -> bool {
		self.on_change.set_if_changed(notifier)
	}
}

/// Development overlay that flags `-1` in a form field.
///
/// Created unmounted; [`mount`](Self::mount) starts the diagnostic effect.
/// Dropping the debugger stops it.
pub struct ValueDebugger {
	props: ValueDebuggerProps,
	config: Rc<DebuggerConfig>,
	sink: Rc<dyn DiagnosticSink>,
	effect: Option<Effect>,
}

impl ValueDebugger {
	/// Creates an unmounted debugger with the default config and [`TracingSink`].
	pub fn new(props: ValueDebuggerProps) -> Self {
		Self {
			props,
			config: Rc::new(DebuggerConfig::default()),
			sink: Rc::new(TracingSink),
			effect: None,
		}
	}

	/// Replaces the configuration.
	pub fn with_config(mut self, config: DebuggerConfig) -> Self {
		self.config = Rc::new(config);
		self
	}

	/// Replaces the diagnostic sink.
	pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
		self.sink = Rc::new(sink);
		self
	}

	/// Starts the diagnostic effect. It runs once right away.
	pub fn mount(mut self) -> Self {
		if self.effect.is_some() {
			return self;
		}
		let props = self.props.clone();
		let config = Rc::clone(&self.config);
		let sink = Rc::clone(&self.sink);
		self.effect = Some(Effect::new(move || {
			run_diagnostics(&props, &config, sink.as_ref());
		}));
		tracing::debug!(field = %self.props.field_name.get_untracked(), "value debugger mounted");
		self
	}

	/// Stops the diagnostic effect. Later prop changes are ignored.
	pub fn unmount(&mut self) {
		if let Some(effect) = self.effect.take() {
			effect.dispose();
			tracing::debug!(field = %self.props.field_name.get_untracked(), "value debugger unmounted");
		}
	}

	/// Whether the effect is running.
	pub fn is_mounted(&self) -> bool {
		self.effect.is_some()
	}

	/// Runs the detection once, outside the reactive schedule.
	///
	/// There is no memory of earlier runs, so calling this repeatedly with the
	/// same props repeats the same logging and correction.
	pub fn check(&self) -> SentinelState {
		reinhardt_reactive::untrack(|| {
			run_diagnostics(&self.props, &self.config, self.sink.as_ref())
		})
	}

	/// Sentinel state for the current value.
	pub fn state(&self) -> SentinelState {
		SentinelState::evaluate(&self.props.value.get_untracked())
	}

	/// The props this debugger observes.
	pub fn props(&self) -> &ValueDebuggerProps {
		&self.props
	}

	/// The active configuration.
	pub fn config(&self) -> &DebuggerConfig {
		&self.config
	}

	/// A reactive view that re-renders from the latest props every time.
	pub fn view(&self) -> Page {
		let props = self.props.clone();
		let config = Rc::clone(&self.config);
		Page::reactive(move || {
			props
				.value
				.with(|value| render_overlay(&props.field_name.get(), value, &config))
		})
	}
}

impl Component for ValueDebugger {
	fn render(&self) -> Page {
		self.props
			.value
			.with(|value| render_overlay(&self.props.field_name.get(), value, &self.config))
	}

	fn name() -> &'static str {
		"ValueDebugger"
	}
}

impl Drop for ValueDebugger {
	fn drop(&mut self) {
		self.unmount();
	}
}

impl std::fmt::Debug for ValueDebugger {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ValueDebugger")
			.field("props", &self.props)
			.field("config", &self.config)
			.field("mounted", &self.is_mounted())
			.finish()
	}
}

/// One pass of the diagnostic effect.
fn run_diagnostics(
	props: &ValueDebuggerProps,
	config: &DebuggerConfig,
	sink: &dyn DiagnosticSink,
) -> SentinelState {
	let value = props.value.get();
	let field_name = props.field_name.get();
	let on_change = props.on_change.get();

	let state = SentinelState::evaluate(&value);
	if !state.is_active() {
		return state;
	}

	let report = SentinelReport::capture(field_name.clone(), value.clone(), config.capture_backtrace);
	sink.report(&report);

	if let Some(notifier) = on_change.filter(|_| config.auto_correct) {
		let replacement = config.replacement.clone();
		sink.auto_correct(&AutoCorrection {
			field_name,
			from: value,
			to: replacement.clone(),
		});
		notifier.call(replacement);
	}

	state
}
