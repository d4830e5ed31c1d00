//! Property system for Horizon TextView.
//!
//! - **Property<T>**: a value with change detection.
//! - **Binding<T>**: a shared, two-way handle to caller-owned state with a
//!   change signal.
//!
//! A widget that receives a [`Binding`] can both read the caller's value and
//! write back into it; the caller observes writes through
//! [`Binding::changed`]. Cloning a binding never copies the value: every
//! clone refers to the same state.
//!
//! # Example
//!
//! ```
//! use horizon_textview_core::Binding;
//!
//! let text = Binding::new(String::new());
//! text.changed().connect(|value| println!("now: {value}"));
//!
//! let widget_side = text.clone();
//! assert!(widget_side.set("hello".to_string()));
//! assert_eq!(text.get(), "hello");
//!
//! // Writing the same value again is not a change.
//! assert!(!widget_side.set("hello".to_string()));
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::logging::targets;
use crate::signal::Signal;

/// A reactive property that tracks changes.
///
/// When `set()` is called, the new value is compared with the current one and
/// the return value reports whether anything changed.
///
/// ```
/// use horizon_textview_core::Property;
///
/// let prop = Property::new(42);
/// assert!(!prop.set(42));
/// assert!(prop.set(100));
/// assert_eq!(prop.get(), 100);
/// ```
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()` instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

struct BindingInner<T> {
    value: Property<T>,
    changed: Signal<T>,
}

/// A two-way binding to caller-owned state.
///
/// The caller creates the binding and keeps a clone; the widget gets another
/// clone. Reads always see the latest value, and writes made through any
/// clone emit [`changed`](Self::changed) once, after the new value is stored.
pub struct Binding<T> {
    inner: Arc<BindingInner<T>>,
}

impl<T: Clone + PartialEq + Send + 'static> Binding<T> {
    /// Create a binding holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(BindingInner {
                value: Property::new(value),
                changed: Signal::new(),
            }),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.inner.value.get()
    }

    /// Access the current value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.value.with(f)
    }

    /// Write a new value.
    ///
    /// Returns `true` and emits [`changed`](Self::changed) if the value
    /// differs from the current one. The lock is released before the signal
    /// fires, so slots may read or write the binding.
    pub fn set(&self, value: T) -> bool {
        if !self.inner.value.set(value.clone()) {
            return false;
        }
        tracing::trace!(target: targets::PROPERTY, "binding changed");
        self.inner.changed.emit(value);
        true
    }

    /// Signal emitted with the new value after every effective write.
    pub fn changed(&self) -> &Signal<T> {
        &self.inner.changed
    }

    /// Check whether two bindings refer to the same state.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + PartialEq + Send + Default + 'static> Default for Binding<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.inner.value.get())
            .field("observers", &self.inner.changed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_property_set_detects_change() {
        let prop = Property::new(10);

        assert!(!prop.set(10));
        assert_eq!(prop.get(), 10);

        assert!(prop.set(20));
        assert_eq!(prop.get(), 20);
    }

    #[test]
    fn test_property_with_closure() {
        let prop = Property::new(vec![1, 2, 3]);
        let sum: i32 = prop.with(|v| v.iter().sum());
        assert_eq!(sum, 6);
    }

    #[test]
    fn test_property_default() {
        let prop: Property<String> = Property::default();
        assert_eq!(prop.get(), "");
    }

    #[test]
    fn test_binding_clones_share_state() {
        let caller = Binding::new(false);
        let widget = caller.clone();

        assert!(widget.set(true));
        assert!(caller.get());
        assert!(caller.ptr_eq(&widget));
        assert!(!caller.ptr_eq(&Binding::new(true)));
    }

    #[test]
    fn test_binding_emits_only_on_change() {
        let binding = Binding::new(String::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        binding.changed().connect(move |value: &String| {
            seen_clone.lock().push(value.clone());
        });

        binding.set("a".to_string());
        binding.set("a".to_string());
        binding.set(String::new());

        assert_eq!(*seen.lock(), vec!["a".to_string(), String::new()]);
    }

    #[test]
    fn test_binding_slot_can_read_binding() {
        let binding = Binding::new(1);
        let observed = Arc::new(Mutex::new(None));

        let reader = binding.clone();
        let observed_clone = observed.clone();
        binding.changed().connect(move |_| {
            *observed_clone.lock() = Some(reader.get());
        });

        binding.set(2);
        assert_eq!(*observed.lock(), Some(2));
    }
}
