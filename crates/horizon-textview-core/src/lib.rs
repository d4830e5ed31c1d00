//! Core systems for Horizon TextView.
//!
//! This crate provides the pieces the text view widget is built on:
//!
//! - **Signal/Slot System**: type-safe notifications with direct and queued
//!   connections
//! - **Property System**: change-detecting properties and two-way bindings to
//!   caller-owned state
//! - **Event Loop**: a cooperative UI loop whose tasks always run on a later
//!   turn than the one that posted them
//! - **Thread Checks**: UI thread affinity assertions
//!
//! # Binding Example
//!
//! ```
//! use horizon_textview_core::{Binding, EventLoop};
//!
//! let event_loop = EventLoop::new();
//! let is_editing = Binding::new(false);
//!
//! // Defer a write to the next turn.
//! let deferred = is_editing.clone();
//! event_loop.handle().post(move || { deferred.set(true); }).unwrap();
//!
//! assert!(!is_editing.get());
//! event_loop.process_turn();
//! assert!(is_editing.get());
//! ```

mod error;
pub mod event_loop;
pub mod logging;
pub mod property;
pub mod signal;
pub mod thread_check;

pub use error::{CoreError, Result, SignalError};
pub use event_loop::{EventLoop, LoopHandle, TaskId, MAX_IDLE_TURNS};
pub use logging::PerfSpan;
pub use property::{Binding, Property};
pub use signal::{ConnectionGuard, ConnectionId, ConnectionType, Signal};
pub use thread_check::ThreadAffinity;
