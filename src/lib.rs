//! # Reinhardt Devtools
//!
//! Development-time diagnostics for Reinhardt pages.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All components enabled
//! - `value-debugger` - The `-1` sentinel overlay ([`value_debugger`])
//!
//! The reactive runtime ([`reactive`]) is always included.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use reinhardt_devtools::prelude::*;
//!
//! let quantity = Signal::new(ObservedValue::from(-1));
//! let on_change = Callback::new({
//!     let quantity = quantity.clone();
//!     move |next: ObservedValue| quantity.set(next)
//! });
//!
//! let props = ValueDebuggerProps::from_signal(quantity.clone(), "quantity").on_change(on_change);
//! let debugger = ValueDebugger::new(props).mount();
//!
//! // The mount-time run reported the sentinel and asked the owner to store "".
//! assert_eq!(quantity.get_untracked(), ObservedValue::from(""));
//! flush_effects();
//! assert!(debugger.render().is_empty());
//! ```

pub use reinhardt_reactive as reactive;

#[cfg(feature = "value-debugger")]
pub use reinhardt_value_debugger as value_debugger;

/// Common imports.
pub mod prelude {
	pub use reinhardt_reactive::{
		Callback, Component, Effect, IntoPage, Page, PageElement, Signal, flush_effects, untrack,
	};

	#[cfg(feature = "value-debugger")]
	pub use reinhardt_value_debugger::{
		BuildMode, ChangeNotifier, ConsoleSink, DebuggerConfig, DiagnosticSink, ObservedValue,
		OverlayCorner, RecordingSink, SentinelState, TracingSink, ValueDebugger,
		ValueDebuggerProps, is_sentinel,
	};
}
