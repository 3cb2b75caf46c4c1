//! Component types - Props, callbacks and cleanup.
//!
//! Props support static values, signals, and getters for reactivity.

use std::rc::Rc;

use spark_signals::Signal;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by listener registrations.
///
/// Call this to unsubscribe and release the handler.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Plain notification callback (click, ok, cancel).
pub type Callback = Rc<dyn Fn()>;

/// Callback receiving a value (change events).
pub type ValueCallback<T> = Rc<dyn Fn(&T)>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Reading a `Signal` or a signal-backed `Getter` inside a derived or effect
/// subscribes to it.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;

    #[test]
    fn test_prop_value_sources() {
        let fixed: PropValue<bool> = true.into();
        assert!(fixed.get());

        let sig = signal(false);
        let reactive: PropValue<bool> = sig.clone().into();
        assert!(!reactive.get());
        sig.set(true);
        assert!(reactive.get());

        let getter = PropValue::Getter(Rc::new(|| 7u8));
        assert_eq!(getter.get(), 7);
        assert!(!PropValue::<bool>::default().get());
    }
}
