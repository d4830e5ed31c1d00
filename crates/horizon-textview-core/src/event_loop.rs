//! Cooperative UI event loop with a next-turn task queue.
//!
//! Everything a widget wants to happen "later" goes through [`LoopHandle::post`].
//! A posted task never runs inside the call that posted it: it runs when the
//! owner of the [`EventLoop`] processes the next turn.
//!
//! A turn executes exactly the tasks that were queued when the turn started.
//! Tasks posted while the turn is running are held for the following turn, so
//! a task can never observe work it scheduled itself within the same turn.
//!
//! # Example
//!
//! ```
//! use horizon_textview_core::EventLoop;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let event_loop = EventLoop::new();
//! let ran = Arc::new(AtomicBool::new(false));
//!
//! let ran_clone = ran.clone();
//! event_loop.handle().post(move || ran_clone.store(true, Ordering::SeqCst)).unwrap();
//! assert!(!ran.load(Ordering::SeqCst));
//!
//! event_loop.process_turn();
//! assert!(ran.load(Ordering::SeqCst));
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{CoreError, Result};
use crate::logging::targets;
use crate::thread_check::ThreadAffinity;

/// Upper bound on turns processed by [`EventLoop::run_until_idle`].
pub const MAX_IDLE_TURNS: usize = 64;

/// A unique identifier for a posted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed task closure.
type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

/// Internal task data.
struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

/// State shared between the loop and its handles.
struct LoopShared {
    tasks: Mutex<VecDeque<TaskData>>,
    exited: AtomicBool,
    turns: AtomicU64,
}

/// The UI event loop.
///
/// Only the thread that created the loop may process turns. Handles can be
/// cloned freely and moved into slots and tasks.
pub struct EventLoop {
    shared: Arc<LoopShared>,
    affinity: ThreadAffinity,
}

impl EventLoop {
    /// Create a new event loop bound to the current thread.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(LoopShared {
                tasks: Mutex::new(VecDeque::new()),
                exited: AtomicBool::new(false),
                turns: AtomicU64::new(0),
            }),
            affinity: ThreadAffinity::current(),
        }
    }

    /// Get a handle for posting tasks to this loop.
    pub fn handle(&self) -> LoopHandle {
        LoopHandle {
            shared: self.shared.clone(),
        }
    }

    /// Run one turn of the loop.
    ///
    /// Returns the number of tasks executed.
    pub fn process_turn(&self) -> usize {
        self.affinity
            .debug_assert_same_thread_with_msg("event loop turn processed off the UI thread");

        let batch = std::mem::take(&mut *self.shared.tasks.lock());
        let turn = self.shared.turns.fetch_add(1, Ordering::Relaxed) + 1;
        let count = batch.len();
        if count > 0 {
            tracing::trace!(target: targets::EVENT_LOOP, turn, count, "processing turn");
        }

        for task_data in batch {
            tracing::trace!(target: targets::EVENT_LOOP, task = task_data.id.as_u64(), "running task");
            (task_data.task)();
        }
        count
    }

    /// Process turns until no task is pending.
    ///
    /// Stops after [`MAX_IDLE_TURNS`] turns if tasks keep scheduling more
    /// tasks. Returns the total number of tasks executed.
    pub fn run_until_idle(&self) -> usize {
        let mut total = 0;
        for _ in 0..MAX_IDLE_TURNS {
            if !self.has_pending() {
                return total;
            }
            total += self.process_turn();
        }
        if self.has_pending() {
            tracing::warn!(
                target: targets::EVENT_LOOP,
                pending = self.pending_count(),
                "event loop still busy after {MAX_IDLE_TURNS} turns"
            );
        }
        total
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.shared.tasks.lock().is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.shared.tasks.lock().len()
    }

    /// Number of turns processed so far.
    pub fn turn_count(&self) -> u64 {
        self.shared.turns.load(Ordering::Relaxed)
    }

    /// Stop accepting tasks and drop everything still queued.
    pub fn quit(&self) {
        self.shared.exited.store(true, Ordering::SeqCst);
        let dropped = {
            let mut tasks = self.shared.tasks.lock();
            let dropped = tasks.len();
            tasks.clear();
            dropped
        };
        tracing::debug!(target: targets::EVENT_LOOP, dropped, "event loop quit");
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("pending", &self.pending_count())
            .field("turns", &self.turn_count())
            .finish()
    }
}

/// A cloneable handle for posting tasks to an [`EventLoop`].
#[derive(Clone)]
pub struct LoopHandle {
    shared: Arc<LoopShared>,
}

impl LoopHandle {
    /// Post a task to run on the next turn of the loop.
    ///
    /// Fails with [`CoreError::EventLoopExited`] once the loop has quit.
    pub fn post<F>(&self, task: F) -> Result<TaskId>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_exited() {
            return Err(CoreError::EventLoopExited);
        }
        let id = next_task_id();
        self.shared.tasks.lock().push_back(TaskData {
            id,
            task: Box::new(task),
        });
        Ok(id)
    }

    /// Check whether the loop has quit.
    pub fn is_exited(&self) -> bool {
        self.shared.exited.load(Ordering::SeqCst)
    }

    /// Check whether two handles refer to the same loop.
    pub fn same_loop(&self, other: &LoopHandle) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl fmt::Debug for LoopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopHandle")
            .field("exited", &self.is_exited())
            .finish()
    }
}
