//! Headless walkthrough of a placeholder text view.
//!
//! Mounts a view on the in-memory platform, then simulates a user tapping
//! the placeholder, composing text through an input method and leaving the
//! field, printing the caller-side state after each step.
//!
//! Run with: RUST_LOG=horizon_textview=trace cargo run -p horizon-textview --example headless_demo

use horizon_textview::platform::{HeadlessPlatform, ImeEvent};
use horizon_textview::prelude::*;
use tracing_subscriber::EnvFilter;

fn report(step: &str, view: &PlaceholderTextView, text: &Binding<String>, is_editing: &Binding<bool>) {
    println!(
        "{step:<24} text={:?} editing={} placeholder={:?}",
        text.get(),
        is_editing.get(),
        view.placeholder_text()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = TextViewConfig::from_toml_str(
        r##"
        placeholder = "Write a note"
        placeholder_position = "top_leading"
        text_color = "#202020"
        autocorrection = "no"
        wait_until_commit = true
        "##,
    )?;

    let event_loop = EventLoop::new();
    let platform = HeadlessPlatform::new();
    let text = Binding::new(String::new());
    let is_editing = Binding::new(false);

    let mut view = PlaceholderTextView::new(
        &platform,
        event_loop.handle(),
        text.clone(),
        is_editing.clone(),
        config.clone(),
    );
    let bounds = Rect::new(0.0, 0.0, 320.0, 160.0);
    view.set_bounds(bounds);
    event_loop.run_until_idle();
    report("mounted", &view, &text, &is_editing);

    let Some(control) = platform.last_control() else {
        return Err("no control was mounted".into());
    };

    view.tap_at(Point::new(24.0, 16.0), bounds);
    event_loop.run_until_idle();
    report("placeholder tapped", &view, &text, &is_editing);
    println!("{:<24} focused={}", "", control.is_first_responder());

    control.handle_ime(&ImeEvent::Preedit("にほ".into(), None));
    report("composing", &view, &text, &is_editing);

    control.handle_ime(&ImeEvent::Commit("日本".into()));
    report("committed", &view, &text, &is_editing);

    text.set("日本語".to_string());
    println!("{:<24} native={:?}", "model changed", control.text());

    control.blur();
    event_loop.run_until_idle();
    report("left the field", &view, &text, &is_editing);

    view.render(text.clone(), is_editing.clone(), config.with_editable(false));
    event_loop.run_until_idle();
    report("made read-only", &view, &text, &is_editing);

    Ok(())
}
