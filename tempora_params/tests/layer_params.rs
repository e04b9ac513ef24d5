// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `ParamStore` and `AccessorSet` used together the way a layer
//! configures itself: documented defaults, application overrides, and
//! accessors swapped at configuration time.

use std::cell::Cell;
use std::rc::Rc;

use tempora_params::{AccessorSet, Field, FieldAccessor, ParamError, ParamStore, ParamValue, keys};

#[derive(Clone, Debug)]
struct Event {
    at: f64,
    length: f64,
    track: f64,
}

fn layer_defaults() -> ParamStore {
    let mut params = ParamStore::new();
    params
        .set_default(keys::NAME, String::from("layer"))
        .set_default(keys::OPACITY, 1.0_f64)
        .set_default(keys::HEIGHT, 1.0_f64)
        .set_default(keys::TOP, 0.0_f64)
        .set_default(keys::COLOR, String::from("#000"))
        .set_default(keys::SELECTABLE, false);
    params
}

#[test]
fn defaults_resolve_and_optional_keys_stay_absent() {
    let params = layer_defaults();
    assert_eq!(params.name(), "layer");
    assert_eq!(params.get::<bool>(keys::SELECTABLE), Ok(false));
    assert!(params.get_opt::<std::ops::Range<f64>>(keys::Y_RANGE).is_none());
    assert!(matches!(
        params.get::<f64>(keys::HANDLER_WIDTH),
        Err(ParamError::Missing { .. })
    ));
}

#[test]
fn set_all_merges_over_defaults() {
    let mut params = layer_defaults();
    params.set_all([
        (keys::OPACITY, ParamValue::new(0.3_f64)),
        (keys::TOP, ParamValue::new(20.0_f64)),
        (keys::OPACITY, ParamValue::new(0.6_f64)),
    ]);

    assert_eq!(params.get::<f64>(keys::OPACITY), Ok(0.6));
    assert_eq!(params.get::<f64>(keys::TOP), Ok(20.0));
    assert_eq!(params.get::<f64>(keys::HEIGHT), Ok(1.0));
}

#[test]
fn error_messages_name_the_key() {
    let params = ParamStore::new();
    let err = params.get::<f64>(keys::MIN_WIDTH).unwrap_err();
    assert_eq!(
        err.to_string(),
        "parameter `min_width` is not set and has no default"
    );
}

#[test]
fn accessor_rules_can_be_stored_as_params() {
    // A rule stored in the params can be installed later by a layer.
    let mut params = ParamStore::new();
    let rule: FieldAccessor<Event, f64> = FieldAccessor::rule(|e: &Event| e.track * 10.0);
    params.set("y_rule", rule);

    let mut accessors = AccessorSet::<Event>::new();
    let stored = params.get::<FieldAccessor<Event, f64>>("y_rule").unwrap();
    accessors.set_accessor(Field::Y, stored);

    let event = Event {
        at: 0.0,
        length: 1.0,
        track: 3.0,
    };
    assert_eq!(accessors.read(Field::Y, &event), 30.0);
}

#[test]
fn writer_sees_every_write() {
    let writes = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&writes);

    let mut accessors = AccessorSet::<Event>::new();
    accessors
        .set_accessor(
            Field::Start,
            FieldAccessor::field(
                |e: &Event| e.at,
                move |e: &mut Event, v| {
                    counter.set(counter.get() + 1);
                    e.at = v;
                },
            ),
        )
        .set_accessor(
            Field::Duration,
            FieldAccessor::field(|e: &Event| e.length, |e: &mut Event, v| e.length = v),
        );

    let mut event = Event {
        at: 1.0,
        length: 2.0,
        track: 0.0,
    };
    accessors
        .write(Field::Start, &mut event, 5.0)
        .write(Field::Start, &mut event, 6.0)
        .write(Field::Duration, &mut event, 0.5);

    assert_eq!(writes.get(), 2);
    assert_eq!(event.at, 6.0);
    assert_eq!(event.length, 0.5);
}
