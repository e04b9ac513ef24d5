// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Error returned when a required parameter cannot be resolved.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// The key has no stored value and no registered default.
    #[error("parameter `{key}` is not set and has no default")]
    Missing {
        /// The key that was queried.
        key: String,
    },
    /// The key holds a value of another type than the one requested.
    #[error("parameter `{key}` holds a `{found}`, not a `{expected}`")]
    TypeMismatch {
        /// The key that was queried.
        key: String,
        /// The requested type.
        expected: &'static str,
        /// The stored type.
        found: &'static str,
    },
}
