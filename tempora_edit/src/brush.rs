// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brush selection: which items does a rectangular extent touch?
//!
//! Intervals are compared per axis in pixel space. The horizontal and
//! vertical tests differ in one comparison: an item whose vertical interval
//! starts exactly where the extent ends still matches, while the same
//! horizontal contact does not.

use bitflags::bitflags;
use kurbo::Rect;

bitflags! {
    /// Axes a brush tests.
    ///
    /// An axis outside the mode always matches, so an empty mode selects
    /// every item.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BrushMode: u8 {
        /// Test horizontal overlap.
        const X = 1 << 0;
        /// Test vertical overlap.
        const Y = 1 << 1;
    }
}

impl BrushMode {
    /// Parses a mode string: an `x` anywhere enables [`BrushMode::X`], a `y`
    /// anywhere enables [`BrushMode::Y`].
    ///
    /// ```rust
    /// use tempora_edit::BrushMode;
    ///
    /// assert_eq!(BrushMode::parse("xy"), BrushMode::all());
    /// assert_eq!(BrushMode::parse("y"), BrushMode::Y);
    /// assert!(BrushMode::parse("none").is_empty());
    /// ```
    #[must_use]
    pub fn parse(mode: &str) -> Self {
        let mut parsed = Self::empty();
        if mode.contains('x') {
            parsed |= Self::X;
        }
        if mode.contains('y') {
            parsed |= Self::Y;
        }
        parsed
    }

    /// Parses an optional mode string; `None` means `"xy"`.
    #[must_use]
    pub fn from_option(mode: Option<&str>) -> Self {
        mode.map_or(Self::all(), Self::parse)
    }
}

impl Default for BrushMode {
    fn default() -> Self {
        Self::all()
    }
}

/// Horizontal overlap of item `[i1, i2]` with extent `[e1, e2]`.
#[must_use]
pub fn overlaps_x(i1: f64, i2: f64, e1: f64, e2: f64) -> bool {
    (e1 <= i1 && i2 < e2) || (e1 <= i2 && i1 < e2)
}

/// Vertical overlap of item `[i1, i2]` with extent `[e1, e2]`.
///
/// Unlike [`overlaps_x`], an item starting exactly at `e2` matches.
#[must_use]
pub fn overlaps_y(i1: f64, i2: f64, e1: f64, e2: f64) -> bool {
    (e1 <= i1 && i2 < e2) || (e1 <= i2 && i1 <= e2)
}

/// Returns `true` if `item` is selected by a brush covering `extent`.
///
/// Both rectangles are in the same pixel space. The extent may be given with
/// its corners in any order.
#[must_use]
pub fn brush_matches(item: Rect, extent: Rect, mode: BrushMode) -> bool {
    let item = item.abs();
    let extent = extent.abs();
    let x = !mode.contains(BrushMode::X) || overlaps_x(item.x0, item.x1, extent.x0, extent.x1);
    let y = !mode.contains(BrushMode::Y) || overlaps_y(item.y0, item.y1, extent.y0, extent.y1);
    x && y
}

/// Capability of layers whose items can be brush-selected.
pub trait Brushable {
    /// Re-evaluates the selection of every item against `extent`.
    ///
    /// Items are marked selected or unselected; nothing carries over from a
    /// previous call. Returns the number of selected items.
    fn brush(&mut self, extent: Rect, mode: BrushMode) -> usize;

    /// Unselects every item.
    fn clear_selection(&mut self);

    /// Returns `true` if the item at `item` is currently selected.
    fn is_selected(&self, item: usize) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_mode_tests_both_axes() {
        assert_eq!(BrushMode::from_option(None), BrushMode::all());
        assert_eq!(BrushMode::from_option(Some("x")), BrushMode::X);
        assert_eq!(BrushMode::default(), BrushMode::X | BrushMode::Y);
    }

    #[test]
    fn contact_at_extent_end_differs_per_axis() {
        // Item [10, 20] touching an extent [5, 10] at its end.
        assert!(!overlaps_x(10.0, 20.0, 5.0, 10.0));
        assert!(overlaps_y(10.0, 20.0, 5.0, 10.0));
    }

    #[test]
    fn contained_and_straddling_items_match() {
        assert!(overlaps_x(10.0, 20.0, 5.0, 20.0));
        assert!(overlaps_x(10.0, 20.0, 5.0, 20.0001));
        assert!(overlaps_x(10.0, 20.0, 15.0, 30.0));
        assert!(!overlaps_x(10.0, 20.0, 21.0, 30.0));
        assert!(!overlaps_y(10.0, 20.0, 0.0, 9.0));
    }

    #[test]
    fn unchecked_axis_always_matches() {
        let item = Rect::new(10.0, 100.0, 20.0, 110.0);
        let extent = Rect::new(0.0, 0.0, 50.0, 50.0);
        assert!(!brush_matches(item, extent, BrushMode::all()));
        assert!(brush_matches(item, extent, BrushMode::X));
        assert!(brush_matches(item, extent, BrushMode::empty()));
    }

    #[test]
    fn reversed_extent_corners_are_normalized() {
        let item = Rect::new(10.0, 10.0, 20.0, 20.0);
        let extent = Rect::new(30.0, 30.0, 0.0, 0.0);
        assert!(brush_matches(item, extent, BrushMode::all()));
    }
}
