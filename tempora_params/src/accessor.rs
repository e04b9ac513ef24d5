// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field accessors: how a layer reads and writes the fields of a data item.
//!
//! Every semantic field of a layer (start, duration, vertical position,
//! height, color, opacity, stroke width) is backed by a [`FieldAccessor`],
//! which is either a constant or a rule evaluated on each item. Rules may also
//! carry a writer so that the same accessor used for rendering can apply a
//! drag mutation.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use crate::keys;
use crate::store::ParamStore;

/// Reads (and optionally writes) one field of a data item `D`.
pub enum FieldAccessor<D, V> {
    /// The same value for every item. Writes are ignored.
    Constant(V),
    /// A value computed from each item.
    Rule {
        /// Reads the field.
        read: Rc<dyn Fn(&D) -> V>,
        /// Writes the field. `None` makes the rule read-only.
        write: Option<Rc<dyn Fn(&mut D, V)>>,
    },
}

impl<D, V: Clone> FieldAccessor<D, V> {
    /// An accessor that always returns `value`.
    #[must_use]
    pub fn constant(value: V) -> Self {
        Self::Constant(value)
    }

    /// A read-only rule.
    #[must_use]
    pub fn rule(read: impl Fn(&D) -> V + 'static) -> Self {
        Self::Rule {
            read: Rc::new(read),
            write: None,
        }
    }

    /// A rule that can also write the field back into the item.
    #[must_use]
    pub fn field(
        read: impl Fn(&D) -> V + 'static,
        write: impl Fn(&mut D, V) + 'static,
    ) -> Self {
        Self::Rule {
            read: Rc::new(read),
            write: Some(Rc::new(write)),
        }
    }

    /// Evaluates the accessor on `item`.
    pub fn read(&self, item: &D) -> V {
        match self {
            Self::Constant(value) => value.clone(),
            Self::Rule { read, .. } => read(item),
        }
    }

    /// Writes `value` into `item`, returning `false` when the accessor cannot write.
    pub fn write(&self, item: &mut D, value: V) -> bool {
        match self {
            Self::Rule {
                write: Some(write), ..
            } => {
                write(item, value);
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if writes reach the item.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        matches!(self, Self::Rule { write: Some(_), .. })
    }
}

impl<D, V: Clone> Clone for FieldAccessor<D, V> {
    fn clone(&self) -> Self {
        match self {
            Self::Constant(value) => Self::Constant(value.clone()),
            Self::Rule { read, write } => Self::Rule {
                read: Rc::clone(read),
                write: write.clone(),
            },
        }
    }
}

impl<D, V: fmt::Debug> fmt::Debug for FieldAccessor<D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Rule { write, .. } => f
                .debug_struct("Rule")
                .field("writable", &write.is_some())
                .finish_non_exhaustive(),
        }
    }
}

/// Numeric fields of an [`AccessorSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Start of the item on the x axis (domain units).
    Start,
    /// Length of the item on the x axis (domain units).
    Duration,
    /// Vertical position (domain units of the y scale).
    Y,
    /// Vertical extent (domain units of the y scale).
    Height,
    /// Fill opacity, `0.0..=1.0`.
    Opacity,
    /// Stroke width in pixels.
    StrokeWidth,
}

/// Data items with a native segment shape.
///
/// Implementing this lets [`AccessorSet::from_datum`] wire every geometric
/// field to the item without writing closures by hand.
pub trait SegmentDatum {
    /// Start, in domain units.
    fn start(&self) -> f64;
    /// Sets the start.
    fn set_start(&mut self, value: f64);
    /// Duration, in domain units.
    fn duration(&self) -> f64;
    /// Sets the duration.
    fn set_duration(&mut self, value: f64);
    /// Vertical position. Items without one sit at `0.0`.
    fn y(&self) -> f64 {
        0.0
    }
    /// Sets the vertical position; ignored by default.
    fn set_y(&mut self, _value: f64) {}
    /// Vertical extent. Items without one span `1.0`.
    fn height(&self) -> f64 {
        1.0
    }
    /// Sets the vertical extent; ignored by default.
    fn set_height(&mut self, _value: f64) {}
}

/// The accessors of one layer.
///
/// Getting and setting an accessor are separate operations
/// ([`accessor`](Self::accessor) / [`set_accessor`](Self::set_accessor)), as
/// are reading and writing through it ([`read`](Self::read) /
/// [`write`](Self::write)).
///
/// # Example
///
/// ```rust
/// use tempora_params::{AccessorSet, Field, FieldAccessor};
///
/// struct Note { at: f64, len: f64 }
///
/// let mut accessors = AccessorSet::<Note>::new();
/// accessors
///     .set_accessor(Field::Start, FieldAccessor::field(|n: &Note| n.at, |n: &mut Note, v| n.at = v))
///     .set_accessor(Field::Duration, FieldAccessor::rule(|n: &Note| n.len))
///     .set_constant(Field::Opacity, 0.5);
///
/// let mut note = Note { at: 1.0, len: 2.0 };
/// accessors.write(Field::Start, &mut note, 4.0).write(Field::Duration, &mut note, 9.0);
/// assert_eq!(accessors.read(Field::Start, &note), 4.0);
/// // Read-only rules ignore writes.
/// assert_eq!(accessors.read(Field::Duration, &note), 2.0);
/// assert_eq!(accessors.read(Field::Opacity, &note), 0.5);
/// ```
pub struct AccessorSet<D> {
    start: FieldAccessor<D, f64>,
    duration: FieldAccessor<D, f64>,
    y: FieldAccessor<D, f64>,
    height: FieldAccessor<D, f64>,
    opacity: FieldAccessor<D, f64>,
    stroke_width: FieldAccessor<D, f64>,
    color: FieldAccessor<D, String>,
}

impl<D> AccessorSet<D> {
    /// Creates a set where every field is a constant.
    ///
    /// Start and y are `0.0`; duration, height, opacity and stroke width are
    /// `1.0`; color is `"#000"`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: FieldAccessor::constant(0.0),
            duration: FieldAccessor::constant(1.0),
            y: FieldAccessor::constant(0.0),
            height: FieldAccessor::constant(1.0),
            opacity: FieldAccessor::constant(1.0),
            stroke_width: FieldAccessor::constant(1.0),
            color: FieldAccessor::constant(String::from("#000")),
        }
    }

    fn slot(&self, field: Field) -> &FieldAccessor<D, f64> {
        match field {
            Field::Start => &self.start,
            Field::Duration => &self.duration,
            Field::Y => &self.y,
            Field::Height => &self.height,
            Field::Opacity => &self.opacity,
            Field::StrokeWidth => &self.stroke_width,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut FieldAccessor<D, f64> {
        match field {
            Field::Start => &mut self.start,
            Field::Duration => &mut self.duration,
            Field::Y => &mut self.y,
            Field::Height => &mut self.height,
            Field::Opacity => &mut self.opacity,
            Field::StrokeWidth => &mut self.stroke_width,
        }
    }

    /// Returns the accessor installed for `field`.
    #[must_use]
    pub fn accessor(&self, field: Field) -> &FieldAccessor<D, f64> {
        self.slot(field)
    }

    /// Installs a constant or a rule for `field`.
    pub fn set_accessor(&mut self, field: Field, accessor: FieldAccessor<D, f64>) -> &mut Self {
        *self.slot_mut(field) = accessor;
        self
    }

    /// Shorthand for installing [`FieldAccessor::constant`].
    pub fn set_constant(&mut self, field: Field, value: f64) -> &mut Self {
        self.set_accessor(field, FieldAccessor::constant(value))
    }

    /// Reads `field` from `item`.
    pub fn read(&self, field: Field, item: &D) -> f64 {
        self.slot(field).read(item)
    }

    /// Writes `value` into `item` through the accessor of `field`.
    ///
    /// Constants and read-only rules leave the item untouched.
    pub fn write(&self, field: Field, item: &mut D, value: f64) -> &Self {
        self.slot(field).write(item, value);
        self
    }

    /// Returns the color accessor.
    #[must_use]
    pub fn color_accessor(&self) -> &FieldAccessor<D, String> {
        &self.color
    }

    /// Installs the color accessor.
    pub fn set_color_accessor(&mut self, accessor: FieldAccessor<D, String>) -> &mut Self {
        self.color = accessor;
        self
    }

    /// Reads the color of `item`.
    pub fn read_color(&self, item: &D) -> String {
        self.color.read(item)
    }

    /// Writes the color of `item`.
    pub fn write_color(&self, item: &mut D, value: String) -> &Self {
        self.color.write(item, value);
        self
    }

    /// Installs constant presentation accessors from layer parameters.
    ///
    /// Reads explicitly set `color`, `opacity` and `width` (stroke width).
    /// Defaults, missing keys and mistyped values leave the current accessor
    /// in place, so rules installed by the application survive.
    pub fn apply_presentation(&mut self, params: &ParamStore) -> &mut Self {
        let explicit = |key: &str| params.is_explicit(key);
        if explicit(keys::COLOR) {
            if let Some(color) = params.get_opt::<String>(keys::COLOR) {
                self.color = FieldAccessor::constant(color);
            }
        }
        if explicit(keys::OPACITY) {
            if let Some(opacity) = params.get_opt::<f64>(keys::OPACITY) {
                self.opacity = FieldAccessor::constant(opacity);
            }
        }
        if explicit(keys::WIDTH) {
            if let Some(width) = params.get_opt::<f64>(keys::WIDTH) {
                self.stroke_width = FieldAccessor::constant(width);
            }
        }
        self
    }
}

impl<D: SegmentDatum + 'static> AccessorSet<D> {
    /// Wires start, duration, y and height to the item's [`SegmentDatum`] impl.
    #[must_use]
    pub fn from_datum() -> Self {
        let mut set = Self::new();
        set.set_accessor(Field::Start, FieldAccessor::field(D::start, D::set_start))
            .set_accessor(
                Field::Duration,
                FieldAccessor::field(D::duration, D::set_duration),
            )
            .set_accessor(Field::Y, FieldAccessor::field(D::y, D::set_y))
            .set_accessor(Field::Height, FieldAccessor::field(D::height, D::set_height));
        set
    }
}

impl<D> Default for AccessorSet<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for AccessorSet<D> {
    fn clone(&self) -> Self {
        Self {
            start: self.start.clone(),
            duration: self.duration.clone(),
            y: self.y.clone(),
            height: self.height.clone(),
            opacity: self.opacity.clone(),
            stroke_width: self.stroke_width.clone(),
            color: self.color.clone(),
        }
    }
}

impl<D> fmt::Debug for AccessorSet<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorSet")
            .field("start", &self.start)
            .field("duration", &self.duration)
            .field("y", &self.y)
            .field("height", &self.height)
            .field("opacity", &self.opacity)
            .field("stroke_width", &self.stroke_width)
            .field("color", &self.color)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[derive(Debug, PartialEq)]
    struct Clip {
        start: f64,
        duration: f64,
        lane: f64,
    }

    impl SegmentDatum for Clip {
        fn start(&self) -> f64 {
            self.start
        }
        fn set_start(&mut self, value: f64) {
            self.start = value;
        }
        fn duration(&self) -> f64 {
            self.duration
        }
        fn set_duration(&mut self, value: f64) {
            self.duration = value;
        }
        fn y(&self) -> f64 {
            self.lane
        }
        fn set_y(&mut self, value: f64) {
            self.lane = value;
        }
    }

    fn clip() -> Clip {
        Clip {
            start: 2.0,
            duration: 3.0,
            lane: 1.0,
        }
    }

    #[test]
    fn constants_ignore_writes() {
        let accessors = AccessorSet::<Clip>::new();
        let mut item = clip();
        accessors.write(Field::Start, &mut item, 99.0);
        assert_eq!(item, clip());
        assert_eq!(accessors.read(Field::Start, &item), 0.0);
        assert!(!accessors.accessor(Field::Start).is_writable());
    }

    #[test]
    fn from_datum_reads_and_writes_geometry() {
        let accessors = AccessorSet::<Clip>::from_datum();
        let mut item = clip();
        accessors
            .write(Field::Start, &mut item, 5.0)
            .write(Field::Y, &mut item, 4.0)
            .write(Field::Height, &mut item, 8.0);

        assert_eq!(item.start, 5.0);
        assert_eq!(item.lane, 4.0);
        assert_eq!(accessors.read(Field::Duration, &item), 3.0);
        // Height falls back to the trait default and ignores writes.
        assert_eq!(accessors.read(Field::Height, &item), 1.0);
    }

    #[test]
    fn installing_a_constant_replaces_a_rule() {
        let mut accessors = AccessorSet::<Clip>::from_datum();
        accessors.set_constant(Field::Duration, 10.0);
        let mut item = clip();
        assert_eq!(accessors.read(Field::Duration, &item), 10.0);
        accessors.write(Field::Duration, &mut item, 1.0);
        assert_eq!(item.duration, 3.0);
    }

    #[test]
    fn presentation_comes_from_params() {
        let mut params = ParamStore::new();
        params
            .set(keys::COLOR, "#ff0000".to_string())
            .set(keys::OPACITY, 0.25_f64)
            .set(keys::WIDTH, "thick".to_string());

        let mut accessors = AccessorSet::<Clip>::new();
        accessors.apply_presentation(&params);
        let item = clip();
        assert_eq!(accessors.read_color(&item), "#ff0000");
        assert_eq!(accessors.read(Field::Opacity, &item), 0.25);
        // Mistyped width keeps the previous accessor.
        assert_eq!(accessors.read(Field::StrokeWidth, &item), 1.0);
    }

    #[test]
    fn presentation_defaults_keep_rules() {
        let mut params = ParamStore::new();
        params.set_default(keys::OPACITY, 0.7_f64);

        let mut accessors = AccessorSet::<Clip>::new();
        accessors.set_accessor(
            Field::Opacity,
            FieldAccessor::rule(|c: &Clip| c.lane / 10.0),
        );
        accessors.apply_presentation(&params);
        assert_eq!(accessors.read(Field::Opacity, &clip()), 0.1);
    }

    #[test]
    fn color_rule_can_write_back() {
        struct Tagged {
            color: String,
        }
        let mut accessors = AccessorSet::<Tagged>::new();
        accessors.set_color_accessor(FieldAccessor::field(
            |t: &Tagged| t.color.clone(),
            |t: &mut Tagged, v| t.color = v,
        ));
        let mut item = Tagged {
            color: "#111".to_string(),
        };
        accessors.write_color(&mut item, "#222".to_string());
        assert_eq!(accessors.read_color(&item), "#222");
        assert!(accessors.color_accessor().is_writable());
    }
}
