//! # Reinhardt Value Debugger
//!
//! A development-only overlay that watches one form field and flags the `-1`
//! sentinel, which usually means an unset select or a failed lookup upstream.
//!
//! When the sentinel shows up the debugger:
//!
//! 1. reports the field name, raw value, runtime type tag and a stack trace
//!    to a [`DiagnosticSink`] ([`TracingSink`] by default)
//! 2. asks the owner to replace the value through its [`ChangeNotifier`], if
//!    one was supplied and auto-correction is enabled
//! 3. renders a fixed, click-through warning panel, in development mode only
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_value_debugger::{
//!     BuildMode, DebuggerConfig, RecordingSink, ValueDebugger, ValueDebuggerProps,
//! };
//!
//! let sink = RecordingSink::new();
//! let debugger = ValueDebugger::new(ValueDebuggerProps::new(-1, "quantity"))
//!     .with_config(DebuggerConfig::for_mode(BuildMode::Development))
//!     .with_sink(sink.clone())
//!     .mount();
//!
//! assert_eq!(sink.reports().len(), 1);
//! assert!(debugger.view().render_to_string().contains("quantity"));
//! ```
//!
//! ## Build Mode
//!
//! The overlay only renders in [`BuildMode::Development`]. The process default
//! comes from `REINHARDT_ENV` and falls back to `debug_assertions`; see
//! [`BuildMode::current`]. Diagnostics run in every mode.

pub mod config;
pub mod debugger;
pub mod error;
pub mod mode;
pub mod overlay;
pub mod sentinel;
pub mod sink;
pub mod value;

pub use config::{DEFAULT_LABEL, DebuggerConfig, OverlayCorner};
pub use debugger::{ChangeNotifier, ValueDebugger, ValueDebuggerProps};
pub use error::{ConfigError, ConfigResult};
pub use mode::BuildMode;
pub use overlay::{OVERLAY_CLASS, overlay_style, render_overlay};
pub use sentinel::{SENTINEL_NUMBER, SENTINEL_TEXT, SentinelState, is_sentinel};
pub use sink::{
	AutoCorrection, ConsoleSink, DiagnosticEvent, DiagnosticSink, RecordingSink, SentinelReport,
	TracingSink,
};
pub use value::ObservedValue;
