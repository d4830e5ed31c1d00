//! Native text control abstraction.
//!
//! - [`NativeTextControl`] / [`TextControlFactory`]: the contract a toolkit
//!   backend implements
//! - [`ime`]: input method composition tracking shared by backends
//! - [`HeadlessTextControl`] / [`HeadlessPlatform`]: in-memory backend for
//!   tests and tooling

mod headless;
pub mod ime;
mod native;

pub use headless::{HeadlessPlatform, HeadlessTextControl};
pub use ime::{CompositionState, CompositionUpdate, ImeEvent};
pub use native::{NativeTextControl, TextControlFactory, TextControlSignals};
