// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tempora Scale: the coordinate-transform seam of a timeline.
//!
//! A timeline keeps three coordinate spaces consistent:
//! - **domain** values, in the data's native units (for example seconds);
//! - **range** values, the continuous pixel space used for layout;
//! - **screen** positions, which for Tempora are range values with the
//!   vertical axis flipped by the layers that need it.
//!
//! The engine only ever talks to a [`Scale`]: it maps domain to range with
//! [`Scale::apply`], maps back with [`Scale::invert`], and asks for the pixel
//! extent with [`Scale::range`]. It never constructs or reconfigures a scale.
//!
//! [`LinearScale`] is a small reference implementation with pan and zoom,
//! so that hosts without their own scale library can still drive a timeline.
//!
//! ## Minimal example
//!
//! ```rust
//! use tempora_scale::{LinearScale, Scale};
//!
//! // 0..60 seconds laid out over 600 pixels.
//! let scale = LinearScale::new(0.0..60.0, 0.0..600.0);
//! assert_eq!(scale.apply(30.0), 300.0);
//! assert_eq!(scale.invert(150.0), 15.0);
//! assert_eq!(scale.range(), 0.0..600.0);
//! ```
//!
//! ## Sharing a scale that navigation mutates
//!
//! Views hand the same scale to every layer as an `Rc<dyn Scale>`. When the
//! host wants to pan or zoom it, wrap it in a `RefCell`; `RefCell<S>` is a
//! [`Scale`] too.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tempora_scale::{LinearScale, Scale};
//!
//! let scale = Rc::new(RefCell::new(LinearScale::new(0.0..10.0, 0.0..100.0)));
//! let shared: Rc<dyn Scale> = scale.clone();
//!
//! scale.borrow_mut().pan_by_range(20.0);
//! assert_eq!(shared.apply(0.0), 20.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod linear;

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::ops::Range;

pub use linear::LinearScale;

/// A continuous, invertible mapping from domain values to range values.
///
/// Implementations must keep [`Scale::invert`] the inverse of
/// [`Scale::apply`] for every domain value that maps inside the range.
pub trait Scale: fmt::Debug {
    /// Maps a domain value into range (pixel) space.
    fn apply(&self, value: f64) -> f64;

    /// Maps a range (pixel) value back into the domain.
    fn invert(&self, value: f64) -> f64;

    /// Returns the range extent as `start..end`, in the order it was configured.
    ///
    /// A vertical axis is often configured descending, for example
    /// `300.0..0.0`. Use [`Scale::extent`] for bounds checks.
    fn range(&self) -> Range<f64>;

    /// Returns the range as `min..max`, whatever order it was configured in.
    fn extent(&self) -> Range<f64> {
        let range = self.range();
        if range.end < range.start {
            range.end..range.start
        } else {
            range
        }
    }

    /// Pixel distance of `value` from where the domain origin maps, measured
    /// in the direction the range grows.
    ///
    /// For an ascending range that starts at the domain origin this is just
    /// [`Scale::apply`]. For a descending range it is still positive for
    /// positive domain values.
    fn distance(&self, value: f64) -> f64 {
        let range = self.range();
        let delta = self.apply(value) - self.apply(0.0);
        if range.end < range.start {
            -delta
        } else {
            delta
        }
    }

    /// Maps a pixel distance from [`Scale::distance`] back into the domain.
    fn invert_distance(&self, distance: f64) -> f64 {
        let range = self.range();
        let delta = if range.end < range.start {
            -distance
        } else {
            distance
        };
        self.invert(self.apply(0.0) + delta)
    }

    /// Returns `true` if a span of `len` pixels starting at `start` lies
    /// entirely within the range.
    ///
    /// Both bounds are inclusive and the range order does not matter.
    fn contains_span(&self, start: f64, len: f64) -> bool {
        let extent = self.extent();
        start >= extent.start && start + len <= extent.end
    }
}

impl<S: Scale + ?Sized> Scale for &S {
    fn apply(&self, value: f64) -> f64 {
        (**self).apply(value)
    }

    fn invert(&self, value: f64) -> f64 {
        (**self).invert(value)
    }

    fn range(&self) -> Range<f64> {
        (**self).range()
    }
}

impl<S: Scale + ?Sized> Scale for Box<S> {
    fn apply(&self, value: f64) -> f64 {
        (**self).apply(value)
    }

    fn invert(&self, value: f64) -> f64 {
        (**self).invert(value)
    }

    fn range(&self) -> Range<f64> {
        (**self).range()
    }
}

impl<S: Scale + ?Sized> Scale for Rc<S> {
    fn apply(&self, value: f64) -> f64 {
        (**self).apply(value)
    }

    fn invert(&self, value: f64) -> f64 {
        (**self).invert(value)
    }

    fn range(&self) -> Range<f64> {
        (**self).range()
    }
}

/// Lets a host keep mutating a scale (pan, zoom, resize) after sharing it.
///
/// # Panics
///
/// Panics if the scale is mutably borrowed while it is being queried, which
/// only happens when a host reconfigures it from inside an event handler that
/// is also reading it.
impl<S: Scale> Scale for RefCell<S> {
    fn apply(&self, value: f64) -> f64 {
        self.borrow().apply(value)
    }

    fn invert(&self, value: f64) -> f64 {
        self.borrow().invert(value)
    }

    fn range(&self) -> Range<f64> {
        self.borrow().range()
    }
}
