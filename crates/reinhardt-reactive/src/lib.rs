//! # Reinhardt Reactive
//!
//! The small reactive core behind Reinhardt devtools components.
//!
//! - [`Signal`]: shared state that records who reads it
//! - [`Effect`]: a side effect re-queued when the Signals it read change
//! - [`flush_effects`]: runs queued Effects (manual flush or an installed scheduler)
//! - [`Page`]: the view tree, renderable to HTML for SSR and tests
//! - [`Callback`]: a cloneable, identity-comparable closure for props
//! - [`Component`]: the trait components implement
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_reactive::{Effect, Signal, flush_effects};
//!
//! let name = Signal::new(String::from("quantity"));
//! let _effect = Effect::new({
//!     let name = name.clone();
//!     move || tracing::debug!(field = %name.get(), "field changed")
//! });
//!
//! name.set(String::from("price"));
//! flush_effects();
//! ```

pub mod callback;
pub mod component;
pub mod effect;
pub mod page;
pub mod runtime;
pub mod signal;

pub use callback::Callback;
pub use component::Component;
pub use effect::Effect;
pub use page::{IntoPage, Page, PageElement, Reactive};
pub use runtime::{NodeId, Runtime, flush_effects, set_scheduler, untrack, with_runtime};
pub use signal::Signal;
