//! Logging facilities for Horizon TextView.
//!
//! Horizon TextView uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; applications do:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_textview=debug,horizon_textview_core=info")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_textview_core";
    /// Event loop target.
    pub const EVENT_LOOP: &str = "horizon_textview_core::event_loop";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_textview_core::signal";
    /// Property and binding target.
    pub const PROPERTY: &str = "horizon_textview_core::property";
    /// Text field binding target.
    pub const BINDING: &str = "horizon_textview::binding";
    /// Headless control target.
    pub const HEADLESS: &str = "horizon_textview::headless";
}

/// A performance tracing span.
///
/// Creates an `info`-level span on the `horizon_textview::perf` target that
/// stays entered until the guard is dropped. Subscribers with span timing
/// enabled report how long the guarded operation took.
///
/// ```
/// use horizon_textview_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("update_pass");
///     // ... timed work ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_textview::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
