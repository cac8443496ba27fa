//! Reactive properties.
//!
//! [`Property<T>`] wraps a value with interior mutability and change
//! detection. It stands in for the host framework's mutable bindings: the
//! application and a [`PresentationHost`](crate::PresentationHost) share one
//! `Arc<Property<bool>>`, and either side may flip it between update cycles.
//!
//! # Example
//!
//! ```
//! use horizon_scrim::Property;
//!
//! let presented = Property::new(false);
//! assert!(!presented.get());
//!
//! // Setting the same value returns false (no change).
//! assert!(!presented.set(false));
//!
//! // Setting a different value returns true (changed).
//! assert!(presented.set(true));
//! assert!(presented.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive value with change detection.
///
/// # Thread Safety
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// when `T` is. The presentation host only ever touches properties on the
/// UI thread, but the types stay shareable so application state can hold
/// them freely.
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
    /// This clones the value. For large types, consider using `with()`
    /// instead.
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

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The new value is compared with the current one using `PartialEq`;
    /// if they are equal the value is left untouched and `false` is
    /// returned.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property").field("value", &self.get()).finish()
    }
}
