//! Overlay rendering.
//!
//! The overlay is a fixed, click-through panel pinned to a viewport corner. It
//! is derived only from the field name and value; the diagnostic effect does
//! not feed into it.

use reinhardt_reactive::{IntoPage, Page, PageElement};

use crate::config::{DebuggerConfig, OverlayCorner};
use crate::sentinel::is_sentinel;
use crate::value::ObservedValue;

/// CSS class on the overlay root element.
pub const OVERLAY_CLASS: &str = "reinhardt-value-debugger";

/// Inline style for the overlay panel in `corner`.
pub fn overlay_style(corner: OverlayCorner) -> String {
	format!(
		"position: fixed; {} z-index: 9999; pointer-events: none; \
		 background: #dc2626; color: #ffffff; padding: 10px; border-radius: 4px; \
		 font-family: monospace; font-size: 12px; max-width: 300px;",
		corner.css()
	)
}

/// Renders the overlay for one field, or `Page::Empty`.
///
/// Nothing is rendered outside development mode, and nothing is rendered
/// unless `value` is the sentinel.
pub fn render_overlay(field_name: &str, value: &ObservedValue, config: &DebuggerConfig) -> Page {
	if !config.mode.is_development() || !is_sentinel(value) {
		return Page::Empty;
	}

	PageElement::new("div")
		.attr("class", OVERLAY_CLASS)
		.attr("role", "alert")
		.attr("aria-live", "polite")
		.attr("data-field", field_name.to_string())
		.attr("style", overlay_style(config.corner))
		.child(
			PageElement::new("strong")
				.attr("class", format!("{OVERLAY_CLASS}__label"))
				.child(config.label.clone()),
		)
		.child(line("Field", field_name.to_string()))
		.child(line("Value", value.to_string()))
		.child(line("Type", value.type_tag().to_string()))
		.into_page()
}

fn line(label: &'static str, content: String) -> PageElement {
	PageElement::new("div")
		.attr("class", format!("{OVERLAY_CLASS}__row"))
		.child(format!("{label}: "))
		.child(PageElement::new("code").child(content))
}
