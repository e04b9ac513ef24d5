// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-erased parameter values.
//!
//! A layer's parameters mix numbers, strings, flags, edit-constraint sets and
//! accessor rules, so [`ParamValue`] stores any `'static + Clone` value and
//! remembers its type for later downcasting.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

/// A type-erased parameter value.
///
/// # Example
///
/// ```rust
/// use tempora_params::ParamValue;
///
/// let value = ParamValue::new(0.7_f64);
/// assert!(value.is::<f64>());
/// assert_eq!(value.downcast_ref::<f64>(), Some(&0.7));
/// assert_eq!(value.downcast_ref::<f32>(), None);
/// ```
pub struct ParamValue {
    inner: Box<dyn CloneAny>,
    type_id: TypeId,
    type_name: &'static str,
}

impl ParamValue {
    /// Wraps a concrete value.
    #[must_use]
    pub fn new<T: Clone + 'static>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            inner: Box::new(value),
        }
    }

    /// Returns `true` if the contained value is of type `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Name of the contained type, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Attempts to downcast to a reference of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if self.is::<T>() {
            self.inner.as_any().downcast_ref()
        } else {
            None
        }
    }
}

impl Clone for ParamValue {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
            type_id: self.type_id,
            type_name: self.type_name,
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamValue")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

trait CloneAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn CloneAny>;
}

impl<T: Clone + 'static> CloneAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn CloneAny> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn clone_keeps_value_and_type() {
        let value = ParamValue::new(String::from("#000"));
        let cloned = value.clone();
        assert_eq!(
            cloned.downcast_ref::<String>().map(String::as_str),
            Some("#000")
        );
        assert!(value.is::<String>());
    }

    #[test]
    fn downcast_to_wrong_type_is_none() {
        let value = ParamValue::new(vec![1_u8, 2]);
        assert!(value.downcast_ref::<Vec<u16>>().is_none());
        assert_eq!(value.downcast_ref::<Vec<u8>>(), Some(&vec![1, 2]));
    }

    #[test]
    fn debug_names_the_type() {
        let value = ParamValue::new(true);
        let debug = format!("{value:?}");
        assert!(debug.contains("ParamValue"));
        assert!(debug.contains("bool"));
    }
}
