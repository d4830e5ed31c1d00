//! The text view widget.
//!
//! - [`TextFieldBinding`]: keeps a native control and caller state in sync
//! - [`PlaceholderOverlay`]: placeholder visibility, layout and taps
//! - [`PlaceholderTextView`]: both of the above composed in one layout box

mod binding;
mod placeholder;
mod text_view;

pub use binding::TextFieldBinding;
pub use placeholder::{PlaceholderLayout, PlaceholderOverlay};
pub use text_view::{PlaceholderTextView, TextViewLayer};
