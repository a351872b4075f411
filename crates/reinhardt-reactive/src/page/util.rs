//! Escaping helpers used by the SSR renderer.

use std::borrow::Cow;

/// Escapes `& < > " '` for use in HTML text and attribute values.
///
/// Borrows the input when nothing needs escaping.
pub(crate) fn html_escape(s: &str) -> Cow<'_, str> {
	if !s.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(s);
	}
	let mut escaped = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("quantity", "quantity")]
	#[case("<b>\"x\" & 'y'</b>", "&lt;b&gt;&quot;x&quot; &amp; &#x27;y&#x27;&lt;/b&gt;")]
	fn test_html_escape(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(html_escape(input), expected);
	}

	#[rstest]
	fn test_html_escape_borrows_clean_input() {
		assert!(matches!(html_escape("-1"), Cow::Borrowed(_)));
	}
}
