//! Diagnostic sinks.
//!
//! A sink receives two kinds of events from the debugger: a grouped report
//! when a sentinel is detected, and a line announcing an auto-correction.
//!
//! | Sink | Output |
//! |------|--------|
//! | [`TracingSink`] | `tracing` span + `warn`/`info` events (default) |
//! | [`ConsoleSink`] | browser-console style groups on stderr or any writer |
//! | [`RecordingSink`] | in-memory list, for tests |
//!
//! Logging is best effort: sinks never fail and never panic on I/O errors.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use serde::Serialize;

use crate::value::ObservedValue;

/// Placeholder used when no stack trace was captured.
pub const BACKTRACE_UNAVAILABLE: &str = "Stack trace not available";

/// Everything known about one sentinel detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentinelReport {
	/// Field identifier supplied by the owner.
	pub field_name: String,
	/// The raw value that matched.
	pub value: ObservedValue,
	/// Runtime type tag of `value`.
	pub type_tag: &'static str,
	/// Stack trace at detection time, or a note explaining why there is none.
	pub backtrace: String,
}

impl SentinelReport {
	/// Builds a report, capturing a stack trace when `capture_backtrace` is set.
	pub fn capture(
		field_name: impl Into<String>,
		value: ObservedValue,
		capture_backtrace: bool,
	) -> Self {
		let backtrace = if capture_backtrace {
			let trace = Backtrace::force_capture();
			match trace.status() {
				BacktraceStatus::Captured => trace.to_string(),
				_ => format!("{BACKTRACE_UNAVAILABLE} (unsupported on this platform)"),
			}
		} else {
			format!("{BACKTRACE_UNAVAILABLE} (capture disabled)")
		};

		Self {
			field_name: field_name.into(),
			type_tag: value.type_tag(),
			value,
			backtrace,
		}
	}
}

/// An auto-correction request sent to the owner's notifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoCorrection {
	/// Field identifier supplied by the owner.
	pub field_name: String,
	/// The sentinel value being replaced.
	pub from: ObservedValue,
	/// The replacement handed to the notifier.
	pub to: ObservedValue,
}

/// Receiver for debugger diagnostics.
pub trait DiagnosticSink {
	/// Called once per effect run that sees a sentinel.
	fn report(&self, report: &SentinelReport);

	/// Called right before the notifier is invoked.
	fn auto_correct(&self, correction: &AutoCorrection);
}

/// Default sink: structured `tracing` events grouped under a span.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
	fn report(&self, report: &SentinelReport) {
		let span = tracing::warn_span!("value_debugger", field = %report.field_name);
		let _guard = span.enter();
		tracing::warn!(
			field = %report.field_name,
			value = %report.value,
			type_tag = report.type_tag,
			"-1 value detected"
		);
		tracing::warn!(backtrace = %report.backtrace, "stack trace at detection");
	}

	fn auto_correct(&self, correction: &AutoCorrection) {
		tracing::info!(
			field = %correction.field_name,
			from = %correction.from,
			to = ?correction.to.to_string(),
			"auto-correcting -1 value"
		);
	}
}

/// Console-group style text output.
///
/// ```text
/// ▼ 🚨 -1 value detected in field "quantity"
///   Field: quantity
///   Value: -1
///   Type: number
///   Stack trace:
///     ...
/// ▲
/// 🔧 Auto-correcting field "quantity" from -1 to ""
/// ```
pub struct ConsoleSink<W: Write = io::Stderr> {
	writer: RefCell<W>,
}

impl ConsoleSink<io::Stderr> {
	/// Writes to standard error.
	pub fn stderr() -> Self {
		Self::new(io::stderr())
	}
}

impl Default for ConsoleSink<io::Stderr> {
	fn default() -> Self {
		Self::stderr()
	}
}

impl<W: Write> ConsoleSink<W> {
	/// Writes to `writer`.
	pub fn new(writer: W) -> Self {
		Self {
			writer: RefCell::new(writer),
		}
	}

	/// Returns the underlying writer.
	pub fn into_inner(self) -> W {
		self.writer.into_inner()
	}

	fn write_report(&self, report: &SentinelReport) -> io::Result<()> {
		let mut out = self.writer.borrow_mut();
		writeln!(
			out,
			"▼ 🚨 -1 value detected in field \"{}\"",
			report.field_name
		)?;
		writeln!(out, "  Field: {}", report.field_name)?;
		writeln!(out, "  Value: {}", report.value)?;
		writeln!(out, "  Type: {}", report.type_tag)?;
		writeln!(out, "  Stack trace:")?;
		for line in report.backtrace.lines() {
			writeln!(out, "    {line}")?;
		}
		writeln!(out, "▲")?;
		out.flush()
	}

	fn write_correction(&self, correction: &AutoCorrection) -> io::Result<()> {
		let mut out = self.writer.borrow_mut();
		writeln!(
			out,
			"🔧 Auto-correcting field \"{}\" from {} to {:?}",
			correction.field_name,
			correction.from,
			correction.to.to_string()
		)?;
		out.flush()
	}
}

impl<W: Write> DiagnosticSink for ConsoleSink<W> {
	fn report(&self, report: &SentinelReport) {
		if let Err(error) = self.write_report(report) {
			tracing::debug!(%error, "console sink write failed");
		}
	}

	fn auto_correct(&self, correction: &AutoCorrection) {
		if let Err(error) = self.write_correction(correction) {
			tracing::debug!(%error, "console sink write failed");
		}
	}
}

impl<W: Write> std::fmt::Debug for ConsoleSink<W> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ConsoleSink")
			.field("writer", &"<writer>")
			.finish()
	}
}

/// One event captured by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticEvent {
	/// A sentinel report.
	Report(SentinelReport),
	/// An auto-correction announcement.
	AutoCorrection(AutoCorrection),
}

/// Sink that keeps every event in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
	events: Rc<RefCell<Vec<DiagnosticEvent>>>,
}

impl RecordingSink {
	/// Creates an empty sink.
	pub fn new() -> Self {
		Self::default()
	}

	/// All events in arrival order.
	pub fn events(&self) -> Vec<DiagnosticEvent> {
		self.events.borrow().clone()
	}

	/// Only the sentinel reports.
	pub fn reports(&self) -> Vec<SentinelReport> {
		self.events
			.borrow()
			.iter()
			.filter_map(|event| match event {
				DiagnosticEvent::Report(report) => Some(report.clone()),
				DiagnosticEvent::AutoCorrection(_) => None,
			})
			.collect()
	}

	/// Only the auto-correction announcements.
	pub fn corrections(&self) -> Vec<AutoCorrection> {
		self.events
			.borrow()
			.iter()
			.filter_map(|event| match event {
				DiagnosticEvent::AutoCorrection(correction) => Some(correction.clone()),
				DiagnosticEvent::Report(_) => None,
			})
			.collect()
	}

	/// Number of recorded events.
	pub fn len(&self) -> usize {
		self.events.borrow().len()
	}

	/// Returns `true` if nothing was recorded.
	pub fn is_empty(&self) -> bool {
		self.events.borrow().is_empty()
	}

	/// Forgets every recorded event.
	pub fn clear(&self) {
		self.events.borrow_mut().clear();
	}
}

impl DiagnosticSink for RecordingSink {
	fn report(&self, report: &SentinelReport) {
		self.events
			.borrow_mut()
			.push(DiagnosticEvent::Report(report.clone()));
	}

	fn auto_correct(&self, correction: &AutoCorrection) {
		self.events
			.borrow_mut()
			.push(DiagnosticEvent::AutoCorrection(correction.clone()));
	}
}
