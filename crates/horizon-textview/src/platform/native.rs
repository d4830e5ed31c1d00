//! The contract a platform text control must fulfil.
//!
//! A [`TextFieldBinding`](crate::TextFieldBinding) never talks to a toolkit
//! directly. It drives a [`NativeTextControl`] and listens to the control's
//! [`TextControlSignals`]. Backends implement the trait for their multi-line
//! text widget; [`HeadlessTextControl`](super::HeadlessTextControl) is the
//! in-memory implementation used by tests.
//!
//! # Ownership
//!
//! Controls are created by a [`TextControlFactory`], which represents the
//! platform's UI tree and owns them. Bindings keep only weak references, so
//! unmounting a control in the tree is enough to release it.

use std::ops::Range;
use std::sync::Arc;

use horizon_textview_core::Signal;

use crate::style::{Color, Font, TextAlignment};

/// Notifications a native control delivers while the user edits it.
#[derive(Debug, Default)]
pub struct TextControlSignals {
    /// The user changed the text. Carries the control's full current string.
    ///
    /// Not emitted for programmatic [`NativeTextControl::set_text`] calls.
    pub text_changed: Signal<String>,
    /// The control became the first responder.
    pub editing_began: Signal<()>,
    /// The control stopped being the first responder.
    pub editing_ended: Signal<()>,
}

/// A platform multi-line text editing control.
///
/// All methods are called on the UI thread. Implementations must not hold
/// internal locks while emitting their signals.
pub trait NativeTextControl: Send + Sync {
    /// The string currently displayed, including any marked text.
    fn text(&self) -> String;

    /// Replace the displayed string.
    fn set_text(&self, text: &str);

    /// Whether an input method has staged text that is not committed yet.
    fn has_marked_text(&self) -> bool;

    /// Apply `alignment` to the paragraphs covering `range` (byte offsets).
    fn set_alignment(&self, alignment: TextAlignment, range: Range<usize>);

    /// Set the font; `None` selects the platform default.
    fn set_font(&self, font: Option<&Font>);

    fn set_text_color(&self, color: Color);

    fn set_background_color(&self, color: Color);

    fn is_autocorrection_enabled(&self) -> bool;

    /// Flip the autocorrection switch.
    fn toggle_autocorrection(&self);

    fn set_editable(&self, editable: bool);

    fn set_selectable(&self, selectable: bool);

    /// Ask for keyboard focus. Returns whether the request was granted.
    fn become_first_responder(&self) -> bool;

    /// Give up keyboard focus. Returns whether focus was released.
    fn resign_first_responder(&self) -> bool;

    fn is_first_responder(&self) -> bool;

    /// The control's delegate signals.
    fn signals(&self) -> &TextControlSignals;
}

/// Creates native controls and owns them on behalf of the UI tree.
pub trait TextControlFactory {
    /// Create and mount a new text control.
    fn create_text_control(&self) -> Arc<dyn NativeTextControl>;
}
