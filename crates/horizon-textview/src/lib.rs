//! Horizon TextView - a placeholder-aware multi-line text view.
//!
//! The widget wraps a platform text control, keeps it synchronized with two
//! caller-owned bindings (the text value and an "is editing" flag), and draws
//! placeholder text over it while the value is empty.
//!
//! # Modules
//!
//! - [`config`]: the [`TextViewConfig`] snapshot, buildable in code or loaded
//!   from TOML
//! - [`style`]: colors, fonts, alignments and padding
//! - [`geometry`]: points, sizes and rectangles for layout and hit testing
//! - [`platform`]: the native control contract and the headless backend
//! - [`widget`]: [`TextFieldBinding`], [`PlaceholderOverlay`] and
//!   [`PlaceholderTextView`]
//!
//! # Example
//!
//! ```
//! use horizon_textview::prelude::*;
//! use horizon_textview::platform::HeadlessPlatform;
//!
//! let event_loop = EventLoop::new();
//! let platform = HeadlessPlatform::new();
//! let text = Binding::new(String::new());
//! let is_editing = Binding::new(false);
//!
//! let view = PlaceholderTextView::new(
//!     &platform,
//!     event_loop.handle(),
//!     text.clone(),
//!     is_editing.clone(),
//!     TextViewConfig::new().with_placeholder("Say something"),
//! );
//! assert!(view.is_placeholder_visible());
//!
//! platform.last_control().unwrap().type_text("hi");
//! assert_eq!(text.get(), "hi");
//! assert!(!view.is_placeholder_visible());
//! ```

pub mod config;
mod error;
pub mod geometry;
pub mod platform;
pub mod prelude;
pub mod style;
pub mod widget;

pub use config::TextViewConfig;
pub use error::{ConfigError, ConfigResult};
pub use geometry::{Point, Rect, Size};
pub use style::{
    Autocorrection, Color, Font, FontFamily, FontWeight, Padding, PlaceholderAlignment,
    TextAlignment,
};
pub use widget::{
    PlaceholderLayout, PlaceholderOverlay, PlaceholderTextView, TextFieldBinding, TextViewLayer,
};
