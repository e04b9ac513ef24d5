// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::Scale;

/// Linear scale from a domain interval onto a pixel range, with pan and zoom.
///
/// Without navigation, `domain.start` maps to `range.start` and `domain.end`
/// maps to `range.end`. Zoom multiplies the pixels-per-unit ratio; pan shifts
/// the result in range space. [`Scale::range`] always reports the configured
/// pixel extent, independent of navigation, so it stays usable as a clamp.
///
/// Descending ranges (for example `300.0..0.0` for a vertical axis) are
/// supported: the ratio is simply negative.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScale {
    domain: Range<f64>,
    range: Range<f64>,
    zoom: f64,
    pan: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl LinearScale {
    /// Creates a new linear scale.
    ///
    /// - Initial zoom is `1.0` and initial pan is zero.
    /// - Zoom is clamped to the range `[1e-6, 1e6]` by default.
    #[must_use]
    pub fn new(domain: Range<f64>, range: Range<f64>) -> Self {
        Self {
            domain,
            range,
            zoom: 1.0,
            pan: 0.0,
            min_zoom: 1e-6,
            max_zoom: 1e6,
        }
    }

    /// Creates a scale whose domain equals its range.
    #[must_use]
    pub fn identity(range: Range<f64>) -> Self {
        Self::new(range.clone(), range)
    }

    /// Returns the configured domain.
    #[must_use]
    pub fn domain(&self) -> Range<f64> {
        self.domain.clone()
    }

    /// Sets the domain. Pan and zoom are kept.
    pub fn set_domain(&mut self, domain: Range<f64>) {
        self.domain = domain;
    }

    /// Sets the pixel range. Pan and zoom are kept.
    pub fn set_range(&mut self, range: Range<f64>) {
        self.range = range;
    }

    /// Returns the current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the current pan offset in range space.
    #[must_use]
    pub fn pan(&self) -> f64 {
        self.pan
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current zoom is clamped into the new range.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Sets the zoom factor, clamping it into the configured zoom range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Pans by a delta in range space.
    pub fn pan_by_range(&mut self, delta: f64) {
        self.pan += delta;
    }

    /// Zooms around an anchor expressed in range space.
    ///
    /// The domain value under the anchor stays under the anchor, as far as
    /// the zoom limits allow.
    pub fn zoom_about_range_point(&mut self, anchor: f64, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }

        let anchored = self.invert(anchor);
        self.zoom = new_zoom;
        let moved = self.apply(anchored);
        self.pan_by_range(anchor - moved);
    }

    /// Drops any pan and zoom.
    pub fn reset_navigation(&mut self) {
        self.zoom = 1.0;
        self.pan = 0.0;
    }

    /// Returns the domain interval currently mapped onto the range.
    #[must_use]
    pub fn visible_domain(&self) -> Range<f64> {
        let start = self.invert(self.range.start);
        let end = self.invert(self.range.end);
        if start <= end { start..end } else { end..start }
    }

    /// Pixels per domain unit, including zoom.
    ///
    /// Zero when the domain is empty.
    fn ratio(&self) -> f64 {
        let d_len = self.domain.end - self.domain.start;
        if d_len == 0.0 {
            return 0.0;
        }
        self.zoom * (self.range.end - self.range.start) / d_len
    }
}

impl Scale for LinearScale {
    fn apply(&self, value: f64) -> f64 {
        self.range.start + self.pan + self.ratio() * (value - self.domain.start)
    }

    /// Collapses to `domain.start` when the scale is degenerate.
    fn invert(&self, value: f64) -> f64 {
        let ratio = self.ratio();
        if ratio == 0.0 {
            return self.domain.start;
        }
        self.domain.start + (value - self.range.start - self.pan) / ratio
    }

    fn range(&self) -> Range<f64> {
        self.range.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, Scale};

    #[test]
    fn apply_invert_roundtrip() {
        let mut scale = LinearScale::new(0.0..60.0, 0.0..600.0);
        scale.set_zoom(2.0);
        scale.pan_by_range(10.0);

        let value = 12.345;
        let px = scale.apply(value);
        assert!((scale.invert(px) - value).abs() < 1e-9);
    }

    #[test]
    fn offset_domain_and_range() {
        let scale = LinearScale::new(100.0..200.0, 50.0..250.0);
        assert_eq!(scale.apply(100.0), 50.0);
        assert_eq!(scale.apply(150.0), 150.0);
        assert_eq!(scale.invert(250.0), 200.0);
    }

    #[test]
    fn descending_range_flips_direction() {
        let scale = LinearScale::new(0.0..10.0, 300.0..0.0);
        assert_eq!(scale.apply(0.0), 300.0);
        assert_eq!(scale.apply(10.0), 0.0);
        assert_eq!(scale.invert(150.0), 5.0);
    }

    #[test]
    fn descending_range_checks_against_its_extent() {
        let scale = LinearScale::new(0.0..10.0, 100.0..0.0);
        assert_eq!(scale.range(), 100.0..0.0);
        assert_eq!(scale.extent(), 0.0..100.0);
        assert!(scale.contains_span(40.0, 10.0));
        assert!(scale.contains_span(0.0, 100.0));
        assert!(!scale.contains_span(95.0, 10.0));
    }

    #[test]
    fn distances_grow_with_the_range() {
        let up = LinearScale::new(0.0..10.0, 0.0..100.0);
        let down = LinearScale::new(0.0..10.0, 100.0..0.0);
        assert_eq!(up.distance(4.0), 40.0);
        assert_eq!(down.distance(4.0), 40.0);
        assert_eq!(down.distance(1.0), 10.0);
        assert!((down.invert_distance(39.0) - 3.9).abs() < 1e-9);
        assert!((up.invert_distance(39.0) - 3.9).abs() < 1e-9);
    }

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let mut scale = LinearScale::new(0.0..100.0, 0.0..800.0);
        let anchor = 400.0;
        let before = scale.invert(anchor);

        scale.zoom_about_range_point(anchor, 3.0);
        assert!((scale.zoom() - 3.0).abs() < 1e-12);
        assert!((scale.invert(anchor) - before).abs() < 1e-9);
    }

    #[test]
    fn zoom_limits_are_normalized_and_applied() {
        let mut scale = LinearScale::new(0.0..1.0, 0.0..1.0);
        scale.set_zoom(50.0);
        scale.set_zoom_limits(10.0, 0.5);
        assert_eq!(scale.zoom(), 10.0);

        scale.zoom_about_range_point(0.0, 0.0);
        assert_eq!(scale.zoom(), 10.0);
    }

    #[test]
    fn range_ignores_navigation() {
        let mut scale = LinearScale::new(0.0..10.0, 0.0..100.0);
        scale.pan_by_range(-30.0);
        scale.set_zoom(4.0);
        assert_eq!(scale.range(), 0.0..100.0);
        assert!(scale.contains_span(0.0, 100.0));
        assert!(!scale.contains_span(-0.5, 10.0));
        assert!(!scale.contains_span(95.0, 10.0));
    }

    #[test]
    fn visible_domain_tracks_pan() {
        let mut scale = LinearScale::new(0.0..10.0, 0.0..100.0);
        scale.pan_by_range(-50.0);
        let visible = scale.visible_domain();
        assert!((visible.start - 5.0).abs() < 1e-9);
        assert!((visible.end - 15.0).abs() < 1e-9);

        scale.reset_navigation();
        assert_eq!(scale.visible_domain(), 0.0..10.0);
    }

    #[test]
    fn degenerate_domain_does_not_divide_by_zero() {
        let scale = LinearScale::new(5.0..5.0, 0.0..100.0);
        assert_eq!(scale.apply(42.0), 0.0);
        assert_eq!(scale.invert(42.0), 5.0);
    }
}
