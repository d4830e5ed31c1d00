//! Commonly used types, for glob import:
//!
//! ```
//! use horizon_textview::prelude::*;
//! ```

// ============================================================================
// Core
// ============================================================================

pub use horizon_textview_core::{Binding, EventLoop, LoopHandle, Signal};

// ============================================================================
// Widget
// ============================================================================

pub use crate::widget::{PlaceholderOverlay, PlaceholderTextView, TextFieldBinding};

// ============================================================================
// Configuration and Style
// ============================================================================

pub use crate::config::TextViewConfig;
pub use crate::geometry::{Point, Rect, Size};
pub use crate::platform::{NativeTextControl, TextControlFactory};
pub use crate::style::{Autocorrection, Color, Font, FontFamily, TextAlignment};
