//! Page types for component rendering.
//!
//! `Page` is the view tree a component returns. It can be an element, a text
//! node, a fragment, nothing at all, or a reactive node whose content is
//! recomputed from Signals each time it is rendered.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_reactive::page::{IntoPage, Page, PageElement};
//!
//! let view = PageElement::new("div")
//!     .attr("class", "container")
//!     .child("Hello, World!")
//!     .into_page();
//!
//! assert_eq!(view.render_to_string(), r#"<div class="container">Hello, World!</div>"#);
//! ```

mod util;

use std::borrow::Cow;

use util::html_escape;

/// Reactive view that re-evaluates its closure on every render.
pub struct Reactive {
	render: Box<dyn Fn() -> Page + 'static>,
}

impl Reactive {
	/// Evaluates the closure and returns the current view.
	pub fn render(&self) -> Page {
		(self.render)()
	}
}

impl std::fmt::Debug for Reactive {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Reactive")
			.field("render", &"<closure>")
			.finish()
	}
}

/// A unified representation of renderable content.
#[derive(Debug)]
pub enum Page {
	/// A DOM element.
	Element(PageElement),
	/// A text node.
	Text(Cow<'static, str>),
	/// Several views without a wrapper element.
	Fragment(Vec<Page>),
	/// Renders nothing.
	Empty,
	/// A view recomputed from Signals on each render.
	Reactive(Reactive),
}

/// A DOM element in the view tree.
#[derive(Debug)]
pub struct PageElement {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<Page>,
	is_void: bool,
}

impl PageElement {
	/// Creates a new element view.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoPage) -> Self {
		self.children.push(child.into_page());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoPage::into_page));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes in insertion order.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the value of the first attribute named `name`.
	pub fn attr_value(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_ref())
	}

	/// Returns the child views.
	pub fn child_views(&self) -> &[Page] {
		&self.children
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}
}

impl Page {
	/// Creates an element view.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> PageElement {
		PageElement::new(tag)
	}

	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment view.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		Self::Fragment(children.into_iter().map(IntoPage::into_page).collect())
	}

	/// Creates an empty view.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Creates a view that re-runs `render` every time it is rendered.
	///
	/// `render` should read Signals with `.get()` so a hosting Effect picks
	/// up the dependencies.
	///
	/// ```ignore
	/// let count = Signal::new(0);
	/// let view = Page::reactive({
	///     let count = count.clone();
	///     move || Page::text(format!("Count: {}", count.get()))
	/// });
	/// ```
	pub fn reactive<F>(render: F) -> Self
	where
		F: Fn() -> Page + 'static,
	{
		Page::Reactive(Reactive {
			render: Box::new(render),
		})
	}

	/// Returns `true` if the view renders no markup right now.
	///
	/// Reactive views are evaluated to answer this.
	pub fn is_empty(&self) -> bool {
		match self {
			Page::Empty => true,
			Page::Element(_) => false,
			Page::Text(text) => text.is_empty(),
			Page::Fragment(children) => children.iter().all(Page::is_empty),
			Page::Reactive(reactive) => reactive.render().is_empty(),
		}
	}

	/// Concatenates every text node in document order, unescaped.
	pub fn text_content(&self) -> String {
		let mut output = String::new();
		self.collect_text(&mut output);
		output
	}

	fn collect_text(&self, output: &mut String) {
		match self {
			Page::Element(el) => {
				for child in el.child_views() {
					child.collect_text(output);
				}
			}
			Page::Text(text) => output.push_str(text),
			Page::Fragment(children) => {
				for child in children {
					child.collect_text(output);
				}
			}
			Page::Empty => {}
			Page::Reactive(reactive) => reactive.render().collect_text(output),
		}
	}

	/// Renders the view to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_to_string_inner(&mut output);
		output
	}

	fn render_to_string_inner(&self, output: &mut String) {
		match self {
			Page::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());
				for (name, value) in el.attrs() {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
					return;
				}
				output.push('>');
				for child in el.child_views() {
					child.render_to_string_inner(output);
				}
				output.push_str("</");
				output.push_str(el.tag_name());
				output.push('>');
			}
			Page::Text(text) => output.push_str(&html_escape(text)),
			Page::Fragment(children) => {
				for child in children {
					child.render_to_string_inner(output);
				}
			}
			Page::Empty => {}
			Page::Reactive(reactive) => reactive.render().render_to_string_inner(output),
		}
	}
}

/// Trait for types that can be converted into a Page.
pub trait IntoPage {
	/// Converts self into a Page.
	fn into_page(self) -> Page;
}

impl IntoPage for Page {
	fn into_page(self) -> Page {
		self
	}
}

impl IntoPage for PageElement {
	fn into_page(self) -> Page {
		Page::Element(self)
	}
}

impl IntoPage for String {
	fn into_page(self) -> Page {
		Page::Text(Cow::Owned(self))
	}
}

impl IntoPage for &'static str {
	fn into_page(self) -> Page {
		Page::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoPage> IntoPage for Option<T> {
	fn into_page(self) -> Page {
		self.map_or(Page::Empty, IntoPage::into_page)
	}
}
