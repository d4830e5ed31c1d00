//! Integration tests for the placeholder text view and its native binding.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_textview::platform::{HeadlessPlatform, HeadlessTextControl, ImeEvent, NativeTextControl};
use horizon_textview::{
    Autocorrection, PlaceholderOverlay, PlaceholderTextView, Point, Rect, TextViewConfig,
};
use horizon_textview_core::{Binding, EventLoop};

struct Harness {
    event_loop: EventLoop,
    platform: HeadlessPlatform,
    text: Binding<String>,
    is_editing: Binding<bool>,
}

impl Harness {
    fn new(initial: &str) -> Self {
        Self {
            event_loop: EventLoop::new(),
            platform: HeadlessPlatform::new(),
            text: Binding::new(initial.to_string()),
            is_editing: Binding::new(false),
        }
    }

    fn mount(&self, config: TextViewConfig) -> (PlaceholderTextView, Arc<HeadlessTextControl>) {
        let view = PlaceholderTextView::new(
            &self.platform,
            self.event_loop.handle(),
            self.text.clone(),
            self.is_editing.clone(),
            config,
        );
        let control = self.platform.last_control().unwrap();
        (view, control)
    }
}

#[test]
fn placeholder_visible_only_for_empty_text() {
    let with_placeholder = TextViewConfig::new().with_placeholder("Enter name");
    let without_placeholder = TextViewConfig::new();

    for (text, config, expected) in [
        ("", &with_placeholder, true),
        ("a", &with_placeholder, false),
        ("", &without_placeholder, false),
        ("a", &without_placeholder, false),
    ] {
        assert_eq!(
            PlaceholderOverlay::visible_text(text, config).is_some(),
            expected,
            "text {text:?}, placeholder {:?}",
            config.placeholder
        );
    }

    let harness = Harness::new("");
    let (view, control) = harness.mount(with_placeholder);
    assert!(view.is_placeholder_visible());
    control.type_text("x");
    assert!(!view.is_placeholder_visible());
    control.replace_text("");
    assert!(view.is_placeholder_visible());
}

#[test]
fn composition_guard_respects_wait_until_commit() {
    let harness = Harness::new("");
    let config = TextViewConfig::new().with_wait_until_commit(true);
    let (mut view, control) = harness.mount(config.clone());

    control.handle_ime(&ImeEvent::Enabled);
    control.handle_ime(&ImeEvent::Preedit("ㅎ".into(), Some((0, 3))));
    let writes = control.set_text_count();

    harness.text.set("external".to_string());
    assert_eq!(control.text(), "ㅎ");
    assert_eq!(control.set_text_count(), writes);

    view.render(
        harness.text.clone(),
        harness.is_editing.clone(),
        config.with_wait_until_commit(false),
    );
    assert_eq!(control.text(), "external");
    assert!(!control.has_marked_text());
}

#[test]
fn external_text_write_reaches_control() {
    let harness = Harness::new("start");
    let (_view, control) = harness.mount(TextViewConfig::new().with_wait_until_commit(true));
    assert_eq!(control.text(), "start");

    harness.text.set("next".to_string());
    assert_eq!(control.text(), "next");

    harness.text.set(String::new());
    harness.event_loop.run_until_idle();
    assert_eq!(control.text(), "");
}

#[test]
fn text_round_trip() {
    let harness = Harness::new("hello");
    let (_view, control) = harness.mount(TextViewConfig::default());
    assert_eq!(control.text(), "hello");

    control.replace_text("world");
    assert_eq!(harness.text.get(), "world");
    assert_eq!(control.text(), "world");
}

#[test]
fn committed_ime_text_reaches_binding() {
    let harness = Harness::new("");
    let (_view, control) = harness.mount(TextViewConfig::new().with_wait_until_commit(true));

    control.handle_ime(&ImeEvent::Enabled);
    control.handle_ime(&ImeEvent::Preedit("に".into(), None));
    assert!(control.has_marked_text());
    control.handle_ime(&ImeEvent::Commit("日本".into()));

    assert_eq!(harness.text.get(), "日本");
    assert_eq!(control.text(), "日本");
    assert!(!control.has_marked_text());
}

#[test]
fn eager_update_replaces_marked_text() {
    let harness = Harness::new("");
    let (_view, control) = harness.mount(TextViewConfig::default());

    control.handle_ime(&ImeEvent::Enabled);
    control.handle_ime(&ImeEvent::Preedit("に".into(), None));

    // The preedit echo comes back through the text binding and is written
    // into the control as plain text.
    assert_eq!(harness.text.get(), "に");
    assert_eq!(control.text(), "に");
    assert!(!control.has_marked_text());
}

#[test]
fn repeated_update_does_not_toggle_autocorrection() {
    let harness = Harness::new("");
    let config = TextViewConfig::new().with_autocorrection(Autocorrection::No);
    let (mut view, control) = harness.mount(config.clone());
    let toggles = control.autocorrection_toggle_count();

    harness.text.set("a".to_string());
    harness.text.set("ab".to_string());
    view.render(harness.text.clone(), harness.is_editing.clone(), config);
    assert_eq!(control.autocorrection_toggle_count(), toggles);
    assert!(!control.is_autocorrection_enabled());
}

#[test]
fn focus_request_waits_for_next_turn() {
    let harness = Harness::new("");
    let (_view, control) = harness.mount(TextViewConfig::default());
    harness.event_loop.run_until_idle();

    harness.is_editing.set(true);
    assert!(!control.is_first_responder());
    assert_eq!(control.focus_request_count(), 0);

    harness.event_loop.process_turn();
    assert!(control.is_first_responder());
    assert_eq!(control.focus_request_count(), 1);

    harness.is_editing.set(false);
    assert!(control.is_first_responder());
    harness.event_loop.run_until_idle();
    assert!(!control.is_first_responder());
}

#[test]
fn placeholder_tap_starts_editing_without_writing_text() {
    let harness = Harness::new("");
    let (view, _control) = harness.mount(TextViewConfig::new().with_placeholder("Notes"));

    let writes = Arc::new(AtomicUsize::new(0));
    let counter = writes.clone();
    harness.text.changed().connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let bounds = Rect::new(0.0, 0.0, 300.0, 100.0);
    assert!(view.tap_at(Point::new(20.0, 20.0), bounds));
    assert!(harness.is_editing.get());
    assert_eq!(harness.text.get(), "");
    assert_eq!(writes.load(Ordering::SeqCst), 0);
}

#[test]
fn placeholder_tap_focuses_control() {
    let harness = Harness::new("");
    let (view, control) = harness.mount(TextViewConfig::new().with_placeholder("Notes"));
    harness.event_loop.run_until_idle();

    assert!(view.tap_at(Point::new(1.0, 1.0), Rect::new(0.0, 0.0, 10.0, 10.0)));
    harness.event_loop.run_until_idle();

    assert!(control.is_first_responder());
    assert_eq!(control.focus_request_count(), 1);
    assert!(harness.is_editing.get());
}

#[test]
fn editing_notifications_apply_on_next_turn() {
    let harness = Harness::new("");
    let (_view, control) = harness.mount(TextViewConfig::default());
    harness.event_loop.run_until_idle();

    assert!(control.tap());
    assert!(!harness.is_editing.get());
    harness.event_loop.process_turn();
    assert!(harness.is_editing.get());

    assert!(control.blur());
    assert!(harness.is_editing.get());
    harness.event_loop.process_turn();
    assert!(!harness.is_editing.get());
}

#[test]
fn rebound_view_writes_new_bindings() {
    let harness = Harness::new("old");
    let (mut view, control) = harness.mount(TextViewConfig::default());

    let text = Binding::new("fresh".to_string());
    let is_editing = Binding::new(false);
    view.render(text.clone(), is_editing.clone(), TextViewConfig::default());
    assert_eq!(control.text(), "fresh");

    control.type_text("!");
    assert_eq!(text.get(), "fresh!");
    assert_eq!(harness.text.get(), "old");

    harness.text.set("stale".to_string());
    assert_eq!(control.text(), "fresh!");

    control.tap();
    harness.event_loop.run_until_idle();
    assert!(is_editing.get());
    assert!(!harness.is_editing.get());
}

#[test]
fn deferred_focus_for_unmounted_control_is_noop() {
    let harness = Harness::new("");
    let (view, control) = harness.mount(TextViewConfig::default());
    harness.event_loop.run_until_idle();

    harness.is_editing.set(true);
    assert!(harness.event_loop.has_pending());
    assert!(harness.platform.unmount(0));
    let weak = Arc::downgrade(&control);
    drop(control);

    harness.event_loop.run_until_idle();
    assert!(weak.upgrade().is_none());
    assert!(view.control().is_none());
    assert!(!view.binding().is_mounted());
}

#[test]
fn focus_posted_after_quit_is_dropped() {
    let harness = Harness::new("");
    let (_view, control) = harness.mount(TextViewConfig::default());

    harness.event_loop.quit();
    harness.is_editing.set(true);

    assert!(!harness.event_loop.has_pending());
    assert!(!control.is_first_responder());
}

#[test]
fn config_from_toml_drives_control() {
    let config = TextViewConfig::from_toml_str(
        r##"
        placeholder = "Enter name"
        text_color = "#202020"
        autocorrection = "yes"
        selectable = false
        "##,
    )
    .unwrap();
    assert!(config.editable);
    assert!(!config.wait_until_commit);

    let harness = Harness::new("");
    let (view, control) = harness.mount(config);

    assert_eq!(view.placeholder_text().as_deref(), Some("Enter name"));
    assert!(control.is_autocorrection_enabled());
    assert!(!control.is_selectable());
    assert_eq!(
        control.text_color(),
        Some(horizon_textview::Color::from_rgb8(32, 32, 32))
    );
}
