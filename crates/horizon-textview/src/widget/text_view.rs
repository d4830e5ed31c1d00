//! A multi-line text view with a placeholder overlay.
//!
//! [`PlaceholderTextView`] stacks two layers in one layout box: the native
//! control at the bottom and the placeholder overlay above it. The overlay is
//! only present while the text value is empty, so once the user has typed
//! anything every tap reaches the native control.
//!
//! # Example
//!
//! ```
//! use horizon_textview::geometry::{Point, Rect};
//! use horizon_textview::platform::{HeadlessPlatform, NativeTextControl};
//! use horizon_textview::{PlaceholderTextView, TextViewConfig};
//! use horizon_textview_core::{Binding, EventLoop};
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
//!     TextViewConfig::new().with_placeholder("Enter name"),
//! );
//!
//! let bounds = Rect::new(0.0, 0.0, 320.0, 120.0);
//! assert!(view.tap_at(Point::new(10.0, 10.0), bounds));
//! assert!(is_editing.get());
//!
//! // The control takes focus on the next turn.
//! event_loop.run_until_idle();
//! assert!(view.control().unwrap().is_first_responder());
//! ```

use std::sync::Arc;

use horizon_textview_core::{Binding, LoopHandle};

use super::binding::TextFieldBinding;
use super::placeholder::{PlaceholderLayout, PlaceholderOverlay};
use crate::config::TextViewConfig;
use crate::geometry::{Point, Rect};
use crate::platform::{NativeTextControl, TextControlFactory};

/// One layer of a [`PlaceholderTextView`], in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum TextViewLayer {
    /// The native control, filling the view.
    Control { frame: Rect },
    /// The placeholder overlay, drawn above the control.
    Placeholder(PlaceholderLayout),
}

/// Native text control plus placeholder overlay.
#[derive(Debug)]
pub struct PlaceholderTextView {
    binding: TextFieldBinding,
    text: Binding<String>,
    is_editing: Binding<bool>,
    config: TextViewConfig,
    bounds: Rect,
}

impl PlaceholderTextView {
    /// Mount the native control and run the first update pass.
    pub fn new(
        factory: &dyn TextControlFactory,
        event_loop: LoopHandle,
        text: Binding<String>,
        is_editing: Binding<bool>,
        config: TextViewConfig,
    ) -> Self {
        let binding = TextFieldBinding::mount(
            factory,
            event_loop,
            text.clone(),
            is_editing.clone(),
            &config,
        );
        Self {
            binding,
            text,
            is_editing,
            config,
            bounds: Rect::default(),
        }
    }

    /// Re-render with new bindings and a new config snapshot.
    ///
    /// Between renders the view follows its bindings on its own: every
    /// change to the text or the editing flag runs the update pass.
    pub fn render(&mut self, text: Binding<String>, is_editing: Binding<bool>, config: TextViewConfig) {
        self.binding.rebind(text.clone(), is_editing.clone());
        self.text = text;
        self.is_editing = is_editing;
        self.config = config;
        self.binding.update(&self.config);
    }

    /// Set the bounds the view was laid out in.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether the placeholder is currently shown.
    pub fn is_placeholder_visible(&self) -> bool {
        self.text
            .with(|text| PlaceholderOverlay::visible_text(text, &self.config).is_some())
    }

    /// The placeholder string currently shown, if any.
    pub fn placeholder_text(&self) -> Option<String> {
        self.text.with(|text| {
            PlaceholderOverlay::visible_text(text, &self.config).map(str::to_owned)
        })
    }

    /// Layout of the placeholder within the current bounds, if it is visible.
    pub fn placeholder(&self) -> Option<PlaceholderLayout> {
        self.is_placeholder_visible()
            .then(|| PlaceholderOverlay::layout(self.bounds, &self.config))
    }

    /// The view's layers in paint order, for `bounds`.
    pub fn layers(&self, bounds: Rect) -> Vec<TextViewLayer> {
        let mut layers = vec![TextViewLayer::Control { frame: bounds }];
        if self.is_placeholder_visible() {
            layers.push(TextViewLayer::Placeholder(PlaceholderOverlay::layout(
                bounds,
                &self.config,
            )));
        }
        layers
    }

    /// Route a tap at `point` within a view laid out at `bounds`.
    ///
    /// Returns `true` if the placeholder consumed the tap. Otherwise the tap
    /// belongs to the native control.
    pub fn tap_at(&self, point: Point, bounds: Rect) -> bool {
        if !self.is_placeholder_visible() {
            return false;
        }
        let layout = PlaceholderOverlay::layout(bounds, &self.config);
        if !layout.frame.contains(point) {
            return false;
        }
        PlaceholderOverlay::tap(&self.is_editing);
        true
    }

    /// The native control, if it is still mounted.
    pub fn control(&self) -> Option<Arc<dyn NativeTextControl>> {
        self.binding.control()
    }

    pub fn binding(&self) -> &TextFieldBinding {
        &self.binding
    }

    pub fn config(&self) -> &TextViewConfig {
        &self.config
    }
}
