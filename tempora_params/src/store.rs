// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-layer parameter storage.
//!
//! Like a sparse property store, entries live in a sorted `SmallVec` searched
//! by key, which keeps lookups cache-friendly for the dozen or so keys a layer
//! typically carries. Explicit values and documented defaults are kept apart,
//! so that a default can be replaced later (for example by the view height on
//! load) without clobbering a value the application chose.

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use smallvec::SmallVec;

use crate::error::ParamError;
use crate::keys;
use crate::value::ParamValue;

/// Key type of a [`ParamStore`].
pub type ParamKey = Cow<'static, str>;

const INLINE_CAPACITY: usize = 12;

type Entries = SmallVec<[(ParamKey, ParamValue); INLINE_CAPACITY]>;

/// Named configuration values of one layer.
///
/// - [`ParamStore::get`] resolves the explicit value, then the default, and
///   fails with [`ParamError::Missing`] when neither exists.
/// - [`ParamStore::set`] and [`ParamStore::set_all`] return the store for
///   chaining; later writes to the same key win.
/// - There is no removal operation.
///
/// # Example
///
/// ```rust
/// use tempora_params::{ParamError, ParamStore};
///
/// let mut params = ParamStore::new();
/// params.set_default("opacity", 1.0_f64);
/// params.set("color", String::from("#f00")).set("opacity", 0.5_f64);
///
/// assert_eq!(params.get::<f64>("opacity"), Ok(0.5));
/// assert_eq!(params.get::<String>("color").as_deref(), Ok("#f00"));
/// assert!(matches!(params.get::<f64>("top"), Err(ParamError::Missing { .. })));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParamStore {
    values: Entries,
    defaults: Entries,
}

fn find(entries: &Entries, key: &str) -> Result<usize, usize> {
    entries.binary_search_by(|(k, _)| (**k).cmp(key))
}

fn upsert(entries: &mut Entries, key: ParamKey, value: ParamValue) {
    match find(entries, &key) {
        Ok(idx) => entries[idx].1 = value,
        Err(idx) => entries.insert(idx, (key, value)),
    }
}

impl ParamStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an explicit value for `key`.
    pub fn set<T: Clone + 'static>(&mut self, key: impl Into<ParamKey>, value: T) -> &mut Self {
        self.set_value(key, ParamValue::new(value))
    }

    /// Stores an already erased value for `key`.
    pub fn set_value(&mut self, key: impl Into<ParamKey>, value: ParamValue) -> &mut Self {
        upsert(&mut self.values, key.into(), value);
        self
    }

    /// Registers the documented default of an optional key.
    ///
    /// Defaults never shadow explicit values.
    pub fn set_default<T: Clone + 'static>(
        &mut self,
        key: impl Into<ParamKey>,
        value: T,
    ) -> &mut Self {
        upsert(&mut self.defaults, key.into(), ParamValue::new(value));
        self
    }

    /// Merges explicit values; later pairs override earlier ones.
    pub fn set_all<K, I>(&mut self, values: I) -> &mut Self
    where
        K: Into<ParamKey>,
        I: IntoIterator<Item = (K, ParamValue)>,
    {
        for (key, value) in values {
            upsert(&mut self.values, key.into(), value);
        }
        self
    }

    /// Returns the raw value for `key`: explicit first, then default.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&ParamValue> {
        find(&self.values, key)
            .ok()
            .map(|idx| &self.values[idx].1)
            .or_else(|| find(&self.defaults, key).ok().map(|idx| &self.defaults[idx].1))
    }

    /// Resolves `key` as a `T`, by reference.
    pub fn get_ref<T: 'static>(&self, key: &str) -> Result<&T, ParamError> {
        let value = self.value(key).ok_or_else(|| ParamError::Missing {
            key: key.to_string(),
        })?;
        value.downcast_ref().ok_or_else(|| ParamError::TypeMismatch {
            key: key.to_string(),
            expected: core::any::type_name::<T>(),
            found: value.type_name(),
        })
    }

    /// Resolves `key` as a `T`.
    pub fn get<T: Clone + 'static>(&self, key: &str) -> Result<T, ParamError> {
        self.get_ref(key).cloned()
    }

    /// Resolves an optional key; missing or mistyped values read as `None`.
    #[must_use]
    pub fn get_opt<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        self.get(key).ok()
    }

    /// Resolves `key`, falling back to `fallback` when it cannot be read as a `T`.
    #[must_use]
    pub fn get_or<T: Clone + 'static>(&self, key: &str, fallback: T) -> T {
        self.get(key).unwrap_or(fallback)
    }

    /// Returns `true` if `key` has an explicit value or a default.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Returns `true` if `key` has an explicit value.
    #[must_use]
    pub fn is_explicit(&self, key: &str) -> bool {
        find(&self.values, key).is_ok()
    }

    /// Iterates every resolvable key once: explicit keys, then default-only keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        let explicit = self.values.iter().map(|(k, _)| &**k);
        let defaulted = self
            .defaults
            .iter()
            .map(|(k, _)| &**k)
            .filter(|k| find(&self.values, k).is_err());
        explicit.chain(defaulted)
    }

    /// Number of resolvable keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys().count()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.defaults.is_empty()
    }

    /// The layer name, or `""` when unset.
    #[must_use]
    pub fn name(&self) -> &str {
        self.get_ref::<String>(keys::NAME).map_or("", String::as_str)
    }

    /// Sets the layer name.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.set(keys::NAME, name.into())
    }
}
