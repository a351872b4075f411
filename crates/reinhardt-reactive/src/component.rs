//! Component trait definition.

use crate::page::Page;

/// Trait for reusable UI components.
///
/// A component turns its props into a [`Page`]. Reading Signals with `.get()`
/// inside `render` makes the output reactive when the page is hosted by an
/// Effect or wrapped in [`Page::reactive`].
///
/// # Example
///
/// ```ignore
/// use reinhardt_reactive::{Component, Page, PageElement, IntoPage};
///
/// struct Greeting {
///     name: String,
/// }
///
/// impl Component for Greeting {
///     fn render(&self) -> Page {
///         PageElement::new("div")
///             .attr("class", "greeting")
///             .child(format!("Hello, {}!", self.name))
///             .into_page()
///     }
///
///     fn name() -> &'static str {
///         "Greeting"
///     }
/// }
/// ```
pub trait Component: 'static {
	/// Renders the component to a Page.
	fn render(&self) -> Page;

	/// Returns the component's name for debugging.
	fn name() -> &'static str
	where
		Self: Sized;
}
