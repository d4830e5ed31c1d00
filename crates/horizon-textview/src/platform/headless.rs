//! An in-memory text control and platform tree.
//!
//! [`HeadlessTextControl`] implements [`NativeTextControl`] without any
//! windowing system. It keeps every property the binding forwards, counts the
//! calls that matter for reconciliation, and offers methods that simulate a
//! user typing, composing through an input method, tapping and leaving the
//! control.
//!
//! ```
//! use horizon_textview::platform::{HeadlessTextControl, NativeTextControl};
//!
//! let control = HeadlessTextControl::new();
//! control.signals().text_changed.connect(|text| println!("user typed: {text}"));
//!
//! control.type_text("hi");
//! assert_eq!(control.text(), "hi");
//! ```

use std::ops::Range;
use std::sync::Arc;

use horizon_textview_core::logging::targets;
use parking_lot::{Mutex, RwLock};

use super::ime::{CompositionState, CompositionUpdate, ImeEvent};
use super::native::{NativeTextControl, TextControlFactory, TextControlSignals};
use crate::style::{Color, Font, TextAlignment};

#[derive(Debug)]
struct ControlState {
    committed: String,
    composition: CompositionState,
    alignment: Option<(TextAlignment, Range<usize>)>,
    font: Option<Font>,
    text_color: Option<Color>,
    background_color: Option<Color>,
    autocorrection_enabled: bool,
    editable: bool,
    selectable: bool,
    first_responder: bool,
    set_text_count: usize,
    autocorrection_toggle_count: usize,
    focus_request_count: usize,
    resign_request_count: usize,
}

impl ControlState {
    fn displayed(&self) -> String {
        match self.composition.preedit_text() {
            Some(marked) => format!("{}{}", self.committed, marked),
            None => self.committed.clone(),
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            committed: String::new(),
            composition: CompositionState::new(),
            alignment: None,
            font: None,
            text_color: None,
            background_color: None,
            autocorrection_enabled: true,
            editable: true,
            selectable: true,
            first_responder: false,
            set_text_count: 0,
            autocorrection_toggle_count: 0,
            focus_request_count: 0,
            resign_request_count: 0,
        }
    }
}

/// Signals to fire once the state lock is released.
#[derive(Default)]
struct PendingNotifications {
    text_changed: Option<String>,
    editing_began: bool,
    editing_ended: bool,
}

/// A [`NativeTextControl`] that lives entirely in memory.
///
/// A fresh control is editable, selectable, unfocused, empty, and has
/// autocorrection switched on.
#[derive(Debug, Default)]
pub struct HeadlessTextControl {
    state: RwLock<ControlState>,
    signals: TextControlSignals,
}

impl HeadlessTextControl {
    pub fn new() -> Self {
        Self::default()
    }

    fn notify(&self, pending: PendingNotifications) {
        if let Some(text) = pending.text_changed {
            self.signals.text_changed.emit(text);
        }
        if pending.editing_began {
            self.signals.editing_began.emit(());
        }
        if pending.editing_ended {
            self.signals.editing_ended.emit(());
        }
    }

    // =========================================================================
    // User simulation
    // =========================================================================

    /// Simulate the user typing `text` at the end of the committed text.
    ///
    /// Ignored (returns `false`) when the control is not editable.
    pub fn type_text(&self, text: &str) -> bool {
        let pending = {
            let mut state = self.state.write();
            if !state.editable {
                return false;
            }
            state.committed.push_str(text);
            PendingNotifications {
                text_changed: Some(state.displayed()),
                ..Default::default()
            }
        };
        self.notify(pending);
        true
    }

    /// Simulate the user replacing the whole text (select all + paste).
    pub fn replace_text(&self, text: &str) -> bool {
        let pending = {
            let mut state = self.state.write();
            if !state.editable {
                return false;
            }
            state.committed = text.to_string();
            state.composition.clear();
            PendingNotifications {
                text_changed: Some(state.displayed()),
                ..Default::default()
            }
        };
        self.notify(pending);
        true
    }

    /// Feed an input method event into the control.
    ///
    /// Marked text is shown after the committed text and reported through
    /// `text_changed` like any other edit.
    pub fn handle_ime(&self, event: &ImeEvent) {
        let pending = {
            let mut state = self.state.write();
            if !state.editable {
                return;
            }
            match state.composition.apply(event) {
                CompositionUpdate::None => PendingNotifications::default(),
                CompositionUpdate::Preedit(_) | CompositionUpdate::ClearPreedit => {
                    PendingNotifications {
                        text_changed: Some(state.displayed()),
                        ..Default::default()
                    }
                }
                CompositionUpdate::Commit(text) => {
                    state.committed.push_str(&text);
                    PendingNotifications {
                        text_changed: Some(state.displayed()),
                        ..Default::default()
                    }
                }
            }
        };
        self.notify(pending);
    }

    /// Simulate a tap inside the control. Returns whether it took focus.
    pub fn tap(&self) -> bool {
        self.take_focus()
    }

    /// Simulate focus moving elsewhere.
    pub fn blur(&self) -> bool {
        self.drop_focus()
    }

    fn take_focus(&self) -> bool {
        let pending = {
            let mut state = self.state.write();
            if !state.editable {
                return false;
            }
            if state.first_responder {
                return true;
            }
            state.first_responder = true;
            state.composition.apply(&ImeEvent::Enabled);
            PendingNotifications {
                editing_began: true,
                ..Default::default()
            }
        };
        tracing::trace!(target: targets::HEADLESS, "control became first responder");
        self.notify(pending);
        true
    }

    fn drop_focus(&self) -> bool {
        let pending = {
            let mut state = self.state.write();
            if !state.first_responder {
                return true;
            }
            state.first_responder = false;
            // Leaving the control commits whatever is marked.
            let marked = state.composition.preedit_text().map(str::to_owned);
            state.composition.apply(&ImeEvent::Disabled);
            let text_changed = marked.map(|marked| {
                state.committed.push_str(&marked);
                state.displayed()
            });
            PendingNotifications {
                text_changed,
                editing_ended: true,
                ..Default::default()
            }
        };
        tracing::trace!(target: targets::HEADLESS, "control resigned first responder");
        self.notify(pending);
        true
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// The marked text of an active composition.
    pub fn marked_text(&self) -> Option<String> {
        self.state.read().composition.preedit_text().map(str::to_owned)
    }

    /// The last alignment applied and the range it covered.
    pub fn alignment(&self) -> Option<(TextAlignment, Range<usize>)> {
        self.state.read().alignment.clone()
    }

    pub fn font(&self) -> Option<Font> {
        self.state.read().font.clone()
    }

    pub fn text_color(&self) -> Option<Color> {
        self.state.read().text_color
    }

    pub fn background_color(&self) -> Option<Color> {
        self.state.read().background_color
    }

    pub fn is_editable(&self) -> bool {
        self.state.read().editable
    }

    pub fn is_selectable(&self) -> bool {
        self.state.read().selectable
    }

    /// Number of programmatic `set_text` calls.
    pub fn set_text_count(&self) -> usize {
        self.state.read().set_text_count
    }

    /// Number of autocorrection toggles.
    pub fn autocorrection_toggle_count(&self) -> usize {
        self.state.read().autocorrection_toggle_count
    }

    /// Number of `become_first_responder` calls.
    pub fn focus_request_count(&self) -> usize {
        self.state.read().focus_request_count
    }

    /// Number of `resign_first_responder` calls.
    pub fn resign_request_count(&self) -> usize {
        self.state.read().resign_request_count
    }
}

impl NativeTextControl for HeadlessTextControl {
    fn text(&self) -> String {
        self.state.read().displayed()
    }

    fn set_text(&self, text: &str) {
        let mut state = self.state.write();
        state.committed = text.to_string();
        state.composition.clear();
        state.set_text_count += 1;
    }

    fn has_marked_text(&self) -> bool {
        self.state.read().composition.has_preedit()
    }

    fn set_alignment(&self, alignment: TextAlignment, range: Range<usize>) {
        self.state.write().alignment = Some((alignment, range));
    }

    fn set_font(&self, font: Option<&Font>) {
        self.state.write().font = font.cloned();
    }

    fn set_text_color(&self, color: Color) {
        self.state.write().text_color = Some(color);
    }

    fn set_background_color(&self, color: Color) {
        self.state.write().background_color = Some(color);
    }

    fn is_autocorrection_enabled(&self) -> bool {
        self.state.read().autocorrection_enabled
    }

    fn toggle_autocorrection(&self) {
        let mut state = self.state.write();
        state.autocorrection_enabled = !state.autocorrection_enabled;
        state.autocorrection_toggle_count += 1;
    }

    fn set_editable(&self, editable: bool) {
        self.state.write().editable = editable;
    }

    fn set_selectable(&self, selectable: bool) {
        self.state.write().selectable = selectable;
    }

    fn become_first_responder(&self) -> bool {
        self.state.write().focus_request_count += 1;
        self.take_focus()
    }

    fn resign_first_responder(&self) -> bool {
        self.state.write().resign_request_count += 1;
        self.drop_focus()
    }

    fn is_first_responder(&self) -> bool {
        self.state.read().first_responder
    }

    fn signals(&self) -> &TextControlSignals {
        &self.signals
    }
}

/// A [`TextControlFactory`] standing in for the platform UI tree.
///
/// Mounted controls stay alive until they are unmounted.
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    controls: Mutex<Vec<Arc<HeadlessTextControl>>>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mounted control at `index`, in creation order.
    pub fn control(&self, index: usize) -> Option<Arc<HeadlessTextControl>> {
        self.controls.lock().get(index).cloned()
    }

    /// The most recently mounted control.
    pub fn last_control(&self) -> Option<Arc<HeadlessTextControl>> {
        self.controls.lock().last().cloned()
    }

    /// All mounted controls.
    pub fn controls(&self) -> Vec<Arc<HeadlessTextControl>> {
        self.controls.lock().clone()
    }

    pub fn mounted_count(&self) -> usize {
        self.controls.lock().len()
    }

    /// Remove the control at `index` from the tree, releasing the tree's
    /// reference. Returns `false` if there is no such control.
    pub fn unmount(&self, index: usize) -> bool {
        let mut controls = self.controls.lock();
        if index < controls.len() {
            controls.remove(index);
            tracing::debug!(target: targets::HEADLESS, index, "unmounted text control");
            true
        } else {
            false
        }
    }

    /// Remove every control from the tree.
    pub fn unmount_all(&self) {
        self.controls.lock().clear();
    }
}

impl TextControlFactory for HeadlessPlatform {
    fn create_text_control(&self) -> Arc<dyn NativeTextControl> {
        let control = Arc::new(HeadlessTextControl::new());
        self.controls.lock().push(control.clone());
        tracing::debug!(target: targets::HEADLESS, "mounted text control");
        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn count_signal<Args: Clone + Send + 'static>(
        signal: &horizon_textview_core::Signal<Args>,
    ) -> Arc<AtomicUsize> {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();
        signal.connect(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        counter
    }

    #[test]
    fn test_programmatic_set_text_is_silent() {
        let control = HeadlessTextControl::new();
        let changes = count_signal(&control.signals().text_changed);

        control.set_text("hello");
        assert_eq!(control.text(), "hello");
        assert_eq!(control.set_text_count(), 1);
        assert_eq!(changes.load(Ordering::SeqCst), 0);

        control.type_text("!");
        assert_eq!(control.text(), "hello!");
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_marked_text_is_displayed_and_committed() {
        let control = HeadlessTextControl::new();
        let last = Arc::new(Mutex::new(String::new()));
        let last_clone = last.clone();
        control.signals().text_changed.connect(move |text| {
            *last_clone.lock() = text.clone();
        });

        control.type_text("a");
        control.handle_ime(&ImeEvent::Preedit("に".into(), None));
        assert!(control.has_marked_text());
        assert_eq!(control.text(), "aに");
        assert_eq!(*last.lock(), "aに");

        control.handle_ime(&ImeEvent::Commit("日".into()));
        assert!(!control.has_marked_text());
        assert_eq!(control.text(), "a日");
        assert_eq!(*last.lock(), "a日");
    }

    #[test]
    fn test_set_text_discards_marked_text() {
        let control = HeadlessTextControl::new();
        control.handle_ime(&ImeEvent::Preedit("ka".into(), None));

        control.set_text("plain");
        assert!(!control.has_marked_text());
        assert_eq!(control.text(), "plain");
    }

    #[test]
    fn test_focus_transitions_emit_once() {
        let control = HeadlessTextControl::new();
        let began = count_signal(&control.signals().editing_began);
        let ended = count_signal(&control.signals().editing_ended);

        assert!(control.become_first_responder());
        assert!(control.become_first_responder());
        assert!(control.is_first_responder());
        assert_eq!(began.load(Ordering::SeqCst), 1);
        assert_eq!(control.focus_request_count(), 2);

        assert!(control.resign_first_responder());
        assert!(control.resign_first_responder());
        assert!(!control.is_first_responder());
        assert_eq!(ended.load(Ordering::SeqCst), 1);
        assert_eq!(control.resign_request_count(), 2);
    }

    #[test]
    fn test_read_only_control_refuses_focus_and_input() {
        let control = HeadlessTextControl::new();
        control.set_editable(false);

        assert!(!control.tap());
        assert!(!control.is_first_responder());
        assert!(!control.type_text("x"));
        assert_eq!(control.text(), "");
        assert!(control.is_selectable());
    }

    #[test]
    fn test_blur_commits_marked_text() {
        let control = HeadlessTextControl::new();
        control.tap();
        control.handle_ime(&ImeEvent::Preedit("é".into(), None));

        control.blur();
        assert!(!control.has_marked_text());
        assert_eq!(control.text(), "é");
    }

    #[test]
    fn test_slot_may_call_back_into_control() {
        let control = Arc::new(HeadlessTextControl::new());
        let observed = Arc::new(Mutex::new(String::new()));

        let control_clone = Arc::downgrade(&control);
        let observed_clone = observed.clone();
        control.signals().text_changed.connect(move |_| {
            if let Some(control) = control_clone.upgrade() {
                *observed_clone.lock() = control.text();
                control.set_text_color(Color::BLACK);
            }
        });

        control.type_text("x");
        assert_eq!(*observed.lock(), "x");
        assert_eq!(control.text_color(), Some(Color::BLACK));
    }

    #[test]
    fn test_platform_owns_controls() {
        let platform = HeadlessPlatform::new();
        let control = platform.create_text_control();
        let weak = Arc::downgrade(&control);
        drop(control);

        assert_eq!(platform.mounted_count(), 1);
        assert!(weak.upgrade().is_some());

        assert!(platform.unmount(0));
        assert!(!platform.unmount(0));
        assert!(weak.upgrade().is_none());
    }
}
