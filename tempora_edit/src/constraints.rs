// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bitflags::bitflags;

bitflags! {
    /// Fields of a segment that a drag may change.
    ///
    /// A layer stores its editable set under the `edits` parameter. Deltas on
    /// fields outside the set are forced to zero; the remaining fields still
    /// update. The same flags also report which fields a drag changed or
    /// clamped, see [`DragOutcome`](crate::DragOutcome).
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct EditConstraints: u8 {
        /// Horizontal position (start).
        const X = 1 << 0;
        /// Vertical position.
        const Y = 1 << 1;
        /// Horizontal extent (duration), edited through the resize handles.
        const WIDTH = 1 << 2;
        /// Vertical extent.
        const HEIGHT = 1 << 3;
    }
}

impl EditConstraints {
    /// Builds a set from field names (`"x"`, `"y"`, `"width"`, `"height"`).
    ///
    /// Unknown names are ignored.
    ///
    /// ```rust
    /// use tempora_edit::EditConstraints;
    ///
    /// let edits = EditConstraints::from_names(["x", "width", "depth"]);
    /// assert_eq!(edits, EditConstraints::X | EditConstraints::WIDTH);
    /// ```
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| Self::from_field_name(name.as_ref()))
            .fold(Self::empty(), |acc, flag| acc | flag)
    }

    /// Parses a single field name.
    ///
    /// Unlike the generated [`from_name`](Self::from_name), which matches
    /// flag constants such as `"WIDTH"`, this matches the lowercase field
    /// names used in layer parameters.
    #[must_use]
    pub fn from_field_name(name: &str) -> Option<Self> {
        match name.trim() {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "width" => Some(Self::WIDTH),
            "height" => Some(Self::HEIGHT),
            _ => None,
        }
    }
}
