// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers for views and layers, and the per-timeline id generator.

use alloc::format;
use alloc::string::{String, ToString};

use hashbrown::HashMap;

/// Identifies a view registered on a [`Timeline`](crate::Timeline).
///
/// Ids are handed out in registration order and never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u32);

impl ViewId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Position of the view in its collection.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifies a layer within its [`View`](crate::View).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u32);

impl LayerId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Generates readable string ids, counting separately for each prefix.
///
/// Counters start at zero. An empty prefix yields bare numbers.
///
/// ```rust
/// use tempora_timeline::IdGenerator;
///
/// let mut ids = IdGenerator::new();
/// assert_eq!(ids.next("cursor"), "cursor-0");
/// assert_eq!(ids.next("cursor"), "cursor-1");
/// assert_eq!(ids.next("segment"), "segment-0");
/// assert_eq!(ids.next(""), "0");
/// ```
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    counters: HashMap<String, u64>,
}

impl IdGenerator {
    /// Creates a generator with every counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id for `prefix`.
    pub fn next(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry_ref(prefix).or_insert(0);
        let n = *counter;
        *counter += 1;

        if prefix.is_empty() {
            n.to_string()
        } else {
            format!("{prefix}-{n}")
        }
    }

    /// Returns how many ids were generated for `prefix`.
    #[must_use]
    pub fn issued(&self, prefix: &str) -> u64 {
        self.counters.get(prefix).copied().unwrap_or(0)
    }
}
