//! Placeholder text drawn over an empty text view.
//!
//! The overlay is stateless. Visibility and layout are recomputed from the
//! current text value and config each time they are asked for, so there is
//! no show/hide transition to track.

use horizon_textview_core::Binding;
use horizon_textview_core::logging::targets;

use crate::config::TextViewConfig;
use crate::geometry::{Point, Rect, Size};
use crate::style::{Color, Font, PlaceholderAlignment, TextAlignment};

/// Where and how to draw the placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderLayout {
    /// The overlay's hit area; equal to the text view's bounds.
    pub frame: Rect,
    /// Area the placeholder text is laid out in, inset by the padding.
    pub text_frame: Rect,
    /// Box alignment of the text block inside `text_frame`.
    pub position: PlaceholderAlignment,
    /// Line alignment of the placeholder text.
    pub alignment: TextAlignment,
    pub color: Color,
    /// `None` means the platform default font.
    pub font: Option<Font>,
}

impl PlaceholderLayout {
    /// Origin of a text block of `content` size placed inside `text_frame`.
    ///
    /// Content larger than the text frame is pinned to its leading/top edge.
    pub fn text_origin(&self, content: Size) -> Point {
        let free_width = (self.text_frame.size.width - content.width).max(0.0);
        let free_height = (self.text_frame.size.height - content.height).max(0.0);
        Point::new(
            self.text_frame.left() + free_width * self.position.horizontal_factor(),
            self.text_frame.top() + free_height * self.position.vertical_factor(),
        )
    }
}

/// Placeholder visibility, layout and tap handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderOverlay;

impl PlaceholderOverlay {
    /// The placeholder to show for `text`, if any.
    ///
    /// Shown only while the text is empty and a placeholder is configured.
    pub fn visible_text<'a>(text: &str, config: &'a TextViewConfig) -> Option<&'a str> {
        if text.is_empty() {
            config.placeholder.as_deref()
        } else {
            None
        }
    }

    /// Lay the placeholder out over a text view occupying `bounds`.
    pub fn layout(bounds: Rect, config: &TextViewConfig) -> PlaceholderLayout {
        let padding = config.placeholder_padding;
        PlaceholderLayout {
            frame: bounds,
            text_frame: bounds.inset(padding.horizontal, padding.vertical),
            position: config.placeholder_position,
            alignment: config.placeholder_alignment,
            color: config.placeholder_color,
            font: config.font.clone(),
        }
    }

    /// Handle a tap on the visible placeholder.
    ///
    /// Requests editing; the text value is left untouched.
    pub fn tap(is_editing: &Binding<bool>) {
        tracing::trace!(target: targets::BINDING, "placeholder tapped");
        is_editing.set(true);
    }
}
