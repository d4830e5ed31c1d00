//! Two-way synchronization between caller state and a native text control.
//!
//! [`TextFieldBinding`] keeps a [`NativeTextControl`] consistent with two
//! caller-owned bindings, the text value and the "is editing" flag, and
//! pushes user edits back into them.
//!
//! # Update Pass
//!
//! The update pass runs once right after mount, then whenever the text or
//! the editing flag emits `changed`, and whenever a new config snapshot
//! arrives through [`TextFieldBinding::update`]:
//!
//! 1. Copy the text value into the control, unless `wait_until_commit` is
//!    set and the control holds marked (uncommitted IME) text
//! 2. Reapply the alignment over the whole current text
//! 3. Set font, text color and background color
//! 4. Toggle autocorrection only if the control disagrees with the config
//! 5. Set the editable and selectable flags
//! 6. Post focus reconciliation to the next event loop turn
//!
//! # Delegate
//!
//! - `text_changed` writes the control's string into the text binding
//!   synchronously.
//! - `editing_began` / `editing_ended` write `true` / `false` into the editing
//!   binding on the next turn, never inside the notification.
//!
//! The delegate slots, the binding observers and the deferred focus task all
//! read the bindings and the config through one shared slot at call time, so
//! [`rebind`](TextFieldBinding::rebind) takes effect for callbacks that were
//! connected or scheduled earlier.
//!
//! # Example
//!
//! ```
//! use horizon_textview::platform::{HeadlessPlatform, NativeTextControl};
//! use horizon_textview::{TextFieldBinding, TextViewConfig};
//! use horizon_textview_core::{Binding, EventLoop};
//!
//! let event_loop = EventLoop::new();
//! let platform = HeadlessPlatform::new();
//! let text = Binding::new("hello".to_string());
//! let is_editing = Binding::new(false);
//!
//! let binding = TextFieldBinding::mount(
//!     &platform,
//!     event_loop.handle(),
//!     text.clone(),
//!     is_editing.clone(),
//!     &TextViewConfig::default(),
//! );
//!
//! let control = platform.last_control().unwrap();
//! control.replace_text("world");
//! assert_eq!(text.get(), "world");
//!
//! text.set("from the model".to_string());
//! assert_eq!(control.text(), "from the model");
//! # drop(binding);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use horizon_textview_core::logging::targets;
use horizon_textview_core::{Binding, ConnectionId, LoopHandle, PerfSpan, ThreadAffinity};
use parking_lot::{Mutex, RwLock};

use crate::config::TextViewConfig;
use crate::platform::{NativeTextControl, TextControlFactory};

/// The caller-owned state a binding reads and writes.
#[derive(Clone)]
struct ModelBindings {
    text: Binding<String>,
    is_editing: Binding<bool>,
}

/// Slots connected to the control's delegate signals.
struct DelegateConnections {
    text_changed: ConnectionId,
    editing_began: ConnectionId,
    editing_ended: ConnectionId,
}

/// Slots connected to the `changed` signals of the current bindings.
struct ModelObservers {
    text: Binding<String>,
    text_changed: ConnectionId,
    is_editing: Binding<bool>,
    editing_changed: ConnectionId,
}

impl ModelObservers {
    /// Run the update pass whenever either binding changes.
    ///
    /// Observers hold the shared state weakly; the bindings outlive the
    /// text field and must not keep it alive.
    fn connect(shared: &Arc<Shared>, model: &ModelBindings) -> Self {
        let weak = Arc::downgrade(shared);
        let text_changed = model.text.changed().connect(move |_| {
            if let Some(shared) = weak.upgrade() {
                shared.run_update();
            }
        });

        let weak = Arc::downgrade(shared);
        let editing_changed = model.is_editing.changed().connect(move |_| {
            if let Some(shared) = weak.upgrade() {
                shared.run_update();
            }
        });

        Self {
            text: model.text.clone(),
            text_changed,
            is_editing: model.is_editing.clone(),
            editing_changed,
        }
    }

    fn disconnect(&self) {
        self.text.changed().disconnect(self.text_changed);
        self.is_editing.changed().disconnect(self.editing_changed);
    }
}

/// State shared by the binding, its slots and its deferred tasks.
struct Shared {
    control: Weak<dyn NativeTextControl>,
    model: RwLock<ModelBindings>,
    config: RwLock<TextViewConfig>,
    event_loop: LoopHandle,
    affinity: ThreadAffinity,
}

impl Shared {
    /// Run the update pass against the current config snapshot.
    fn run_update(self: &Arc<Self>) {
        self.affinity
            .debug_assert_same_thread_with_msg("text view updated off the UI thread");

        let Some(control) = self.control.upgrade() else {
            tracing::trace!(target: targets::BINDING, "update skipped, control unmounted");
            return;
        };
        let _span = PerfSpan::new("text_view_update");
        let config = self.config.read().clone();
        let text = self.model.read().text.clone();

        if !config.wait_until_commit || !control.has_marked_text() {
            control.set_text(&text.get());
        } else {
            tracing::trace!(target: targets::BINDING, "composition in progress, keeping native text");
        }

        let len = control.text().len();
        control.set_alignment(config.alignment, 0..len);

        control.set_font(config.font.as_ref());
        control.set_text_color(config.text_color);
        control.set_background_color(config.background_color);

        let wants_autocorrection = config.autocorrection.is_enabled();
        if control.is_autocorrection_enabled() != wants_autocorrection {
            control.toggle_autocorrection();
            tracing::debug!(
                target: targets::BINDING,
                enabled = wants_autocorrection,
                "toggled autocorrection"
            );
        }

        control.set_editable(config.editable);
        control.set_selectable(config.selectable);

        self.schedule_focus_reconciliation();
    }

    /// Post a task that moves native focus to match the editing flag.
    ///
    /// The flag is read when the task runs, not when it is posted.
    fn schedule_focus_reconciliation(self: &Arc<Self>) {
        let shared = self.clone();
        let posted = self.event_loop.post(move || shared.reconcile_focus());

        if let Err(err) = posted {
            tracing::debug!(target: targets::BINDING, error = %err, "focus reconciliation not scheduled");
        }
    }

    fn reconcile_focus(&self) {
        let Some(control) = self.control.upgrade() else {
            tracing::trace!(target: targets::BINDING, "focus request dropped, control unmounted");
            return;
        };
        let is_editing = self.model.read().is_editing.get();
        let granted = if is_editing {
            control.become_first_responder()
        } else {
            control.resign_first_responder()
        };
        tracing::trace!(target: targets::BINDING, is_editing, granted, "focus reconciled");
    }
}

/// Coordinates a native text control with caller-owned bindings.
///
/// The binding does not own the control. The [`TextControlFactory`] that
/// created it does; once the factory drops it, updates and deferred focus
/// requests become no-ops.
pub struct TextFieldBinding {
    shared: Arc<Shared>,
    delegate: DelegateConnections,
    observers: Mutex<ModelObservers>,
}

impl TextFieldBinding {
    /// Create the native control and run the first update pass.
    pub fn mount(
        factory: &dyn TextControlFactory,
        event_loop: LoopHandle,
        text: Binding<String>,
        is_editing: Binding<bool>,
        config: &TextViewConfig,
    ) -> Self {
        let binding = Self::create_native_control(factory, event_loop, text, is_editing, config);
        binding.shared.run_update();
        binding
    }

    /// Create the native control, connect the delegate and start observing
    /// the bindings.
    ///
    /// No styling is applied until the first update pass, which runs on the
    /// next binding change or [`update`](Self::update) call.
    pub fn create_native_control(
        factory: &dyn TextControlFactory,
        event_loop: LoopHandle,
        text: Binding<String>,
        is_editing: Binding<bool>,
        config: &TextViewConfig,
    ) -> Self {
        let affinity = ThreadAffinity::current();
        let control = factory.create_text_control();
        let model = ModelBindings { text, is_editing };
        let shared = Arc::new(Shared {
            control: Arc::downgrade(&control),
            model: RwLock::new(model.clone()),
            config: RwLock::new(config.clone()),
            event_loop,
            affinity,
        });
        let signals = control.signals();

        let text_shared = shared.clone();
        let text_changed = signals.text_changed.connect(move |new_text: &String| {
            text_shared
                .affinity
                .debug_assert_same_thread_with_msg("text change delivered off the UI thread");
            let text = text_shared.model.read().text.clone();
            if text.set(new_text.clone()) {
                tracing::trace!(target: targets::BINDING, len = new_text.len(), "native text pushed to binding");
            }
        });

        let began_shared = shared.clone();
        let editing_began = signals.editing_began.connect_queued(&shared.event_loop, move |_| {
            let is_editing = began_shared.model.read().is_editing.clone();
            is_editing.set(true);
            tracing::trace!(target: targets::BINDING, "editing began");
        });

        let ended_shared = shared.clone();
        let editing_ended = signals.editing_ended.connect_queued(&shared.event_loop, move |_| {
            let is_editing = ended_shared.model.read().is_editing.clone();
            is_editing.set(false);
            tracing::trace!(target: targets::BINDING, "editing ended");
        });

        let observers = ModelObservers::connect(&shared, &model);
        tracing::debug!(target: targets::BINDING, "native text control created");

        Self {
            shared,
            delegate: DelegateConnections {
                text_changed,
                editing_began,
                editing_ended,
            },
            observers: Mutex::new(observers),
        }
    }

    /// Replace the config snapshot and run the update pass.
    pub fn update(&self, config: &TextViewConfig) {
        *self.shared.config.write() = config.clone();
        self.shared.run_update();
    }

    /// Point the delegate, the change observers and future focus requests at
    /// new bindings.
    pub fn rebind(&self, text: Binding<String>, is_editing: Binding<bool>) {
        let model = ModelBindings { text, is_editing };
        let observers = ModelObservers::connect(&self.shared, &model);
        *self.shared.model.write() = model;
        let previous = std::mem::replace(&mut *self.observers.lock(), observers);
        previous.disconnect();
    }

    /// The text binding currently in use.
    pub fn text_binding(&self) -> Binding<String> {
        self.shared.model.read().text.clone()
    }

    /// The editing binding currently in use.
    pub fn editing_binding(&self) -> Binding<bool> {
        self.shared.model.read().is_editing.clone()
    }

    /// The config snapshot the last update pass used.
    pub fn config(&self) -> TextViewConfig {
        self.shared.config.read().clone()
    }

    /// The native control, if it is still mounted.
    pub fn control(&self) -> Option<Arc<dyn NativeTextControl>> {
        self.shared.control.upgrade()
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.control.strong_count() > 0
    }
}

impl Drop for TextFieldBinding {
    fn drop(&mut self) {
        self.observers.lock().disconnect();
        if let Some(control) = self.shared.control.upgrade() {
            let signals = control.signals();
            signals.text_changed.disconnect(self.delegate.text_changed);
            signals.editing_began.disconnect(self.delegate.editing_began);
            signals.editing_ended.disconnect(self.delegate.editing_ended);
        }
    }
}

impl fmt::Debug for TextFieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.shared.model.read();
        f.debug_struct("TextFieldBinding")
            .field("mounted", &self.is_mounted())
            .field("text", &model.text.get())
            .field("is_editing", &model.is_editing.get())
            .finish()
    }
}
