// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole gestures driven through `Timeline::dispatch`: host input in, data
//! edits and scene updates out.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Size};
use tempora_edit::{BrushMode, ElementPart};
use tempora_params::{SegmentDatum, keys};
use tempora_scale::LinearScale;
use tempora_timeline::{
    BrushState, EditState, EditableSegmentLayer, EventKind, EventTarget, IdGenerator,
    InteractionState, ItemRef, ItemShape, Layer, LayerId, MarkerLayer, Modifiers, RawInput, Scene,
    SegmentLayer, SharedData, SourceId, Timeline, TimelineEvent, View, ViewCollection, ViewId,
    shared_data,
};

const EPSILON: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
struct Clip {
    start: f64,
    duration: f64,
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
}

fn clips(items: &[(f64, f64)]) -> SharedData<Clip> {
    shared_data(
        items
            .iter()
            .map(|&(start, duration)| Clip { start, duration }),
    )
}

#[derive(Default)]
struct Recorder {
    shapes: Vec<(LayerId, usize, ItemShape)>,
    removed: Vec<(LayerId, usize)>,
    selected: Vec<(usize, bool)>,
}

impl Recorder {
    fn last_marker_x(&self) -> Option<f64> {
        self.shapes.iter().rev().find_map(|(_, _, shape)| match shape {
            ItemShape::Marker { line, .. } => Some(line.p0.x),
            _ => None,
        })
    }
}

impl Scene for Recorder {
    fn draw_item(&mut self, layer: LayerId, item: usize, shape: &ItemShape) {
        self.shapes.push((layer, item, shape.clone()));
    }

    fn remove_item(&mut self, layer: LayerId, item: usize) {
        self.removed.push((layer, item));
    }

    fn set_selected(&mut self, _layer: LayerId, item: usize, selected: bool) {
        self.selected.push((item, selected));
    }
}

/// 0..10 over 100px horizontally, 0..50 one to one vertically.
fn view() -> View {
    View::new(
        Rc::new(LinearScale::new(0.0..10.0, 0.0..100.0)),
        Rc::new(LinearScale::identity(0.0..50.0)),
        Size::new(100.0, 50.0),
    )
}

fn drag(timeline: &mut Timeline, view: ViewId, target: EventTarget, path: &[Point]) {
    let surface = SourceId::Surface(view);
    let (first, rest) = path.split_first().expect("a drag needs a start point");
    timeline.dispatch(
        surface,
        &RawInput::PointerDown {
            position: *first,
            target,
        },
    );
    for position in rest {
        timeline.dispatch(
            surface,
            &RawInput::PointerMove {
                position: *position,
                target,
            },
        );
    }
    let last = rest.last().unwrap_or(first);
    timeline.dispatch(
        surface,
        &RawInput::PointerUp {
            position: *last,
            target,
        },
    );
}

fn with_editable(data: &SharedData<Clip>) -> (Timeline, ViewId, LayerId) {
    let mut timeline = Timeline::new();
    let view = timeline.register(view());
    let mut layer = EditableSegmentLayer::from_datum();
    layer.set_data(data.clone());
    let (v, ids) = timeline.view_mut(view).expect("registered view");
    let layer = v.add_layer(layer, ids);
    timeline.set_state(EditState::new());
    (timeline, view, layer)
}

fn item(view: ViewId, layer: LayerId, part: ElementPart) -> EventTarget {
    EventTarget::Item(ItemRef {
        view,
        layer,
        item: 0,
        part,
    })
}

#[derive(Debug)]
struct Recording {
    name: &'static str,
    log: Rc<RefCell<Vec<String>>>,
}

impl InteractionState for Recording {
    fn name(&self) -> &str {
        self.name
    }

    fn enter(&mut self, _views: &mut ViewCollection) {
        self.log.borrow_mut().push(format!("enter {}", self.name));
    }

    fn exit(&mut self, _views: &mut ViewCollection) {
        self.log.borrow_mut().push(format!("exit {}", self.name));
    }

    fn handle_event(&mut self, event: &TimelineEvent, _views: &mut ViewCollection) {
        self.log
            .borrow_mut()
            .push(format!("{} {:?}", self.name, event.kind));
    }
}

#[test]
fn previous_state_exits_before_next_enters() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut timeline = Timeline::new();
    assert!(timeline.state().is_none());

    let none = timeline.set_state(Recording {
        name: "a",
        log: log.clone(),
    });
    assert!(none.is_none());
    let previous = timeline.set_state(Recording {
        name: "b",
        log: log.clone(),
    });

    assert_eq!(previous.map(|s| s.name().to_owned()).as_deref(), Some("a"));
    assert_eq!(timeline.state().map(|s| s.name()), Some("b"));
    assert_eq!(*log.borrow(), ["enter a", "exit a", "enter b"]);

    timeline.handle_event(&TimelineEvent::new(EventKind::Click, EventTarget::Document));
    assert_eq!(log.borrow().last().map(String::as_str), Some("b Click"));
}

#[test]
fn listeners_run_in_order_before_the_state() {
    let data = clips(&[(2.0, 3.0)]);
    let (mut timeline, view, layer) = with_editable(&data);

    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        let data = data.clone();
        timeline.on_event(move |event| {
            if event.kind == EventKind::Drag {
                seen.borrow_mut().push(("first", data.borrow()[0].start));
            }
        });
    }
    {
        let seen = seen.clone();
        timeline.on_event(move |event| {
            if event.kind == EventKind::Drag {
                seen.borrow_mut().push(("second", f64::NAN));
            }
        });
    }

    drag(
        &mut timeline,
        view,
        item(view, layer, ElementPart::Body),
        &[Point::new(25.0, 49.0), Point::new(35.0, 49.0)],
    );

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], ("first", 2.0));
    assert_eq!(seen[1].0, "second");
    assert!((data.borrow()[0].start - 3.0).abs() < EPSILON);
}

#[test]
fn a_pointer_drag_reports_the_full_event_sequence() {
    let data = clips(&[(2.0, 3.0)]);
    let (mut timeline, view, layer) = with_editable(&data);
    let kinds = Rc::new(RefCell::new(Vec::new()));
    {
        let kinds = kinds.clone();
        timeline.on_event(move |event| kinds.borrow_mut().push(event.kind));
    }

    drag(
        &mut timeline,
        view,
        item(view, layer, ElementPart::Body),
        &[Point::new(25.0, 49.0), Point::new(30.0, 49.0)],
    );

    assert_eq!(
        *kinds.borrow(),
        [
            EventKind::MouseDown,
            EventKind::DragStart,
            EventKind::Drag,
            EventKind::DragEnd,
            EventKind::MouseUp,
        ]
    );
}

#[test]
fn handles_resize_from_either_edge() {
    let data = clips(&[(2.0, 3.0)]);
    let (mut timeline, view, layer) = with_editable(&data);

    drag(
        &mut timeline,
        view,
        item(view, layer, ElementPart::HandleRight),
        &[Point::new(49.0, 49.0), Point::new(59.0, 49.0)],
    );
    {
        let clip = &data.borrow()[0];
        assert!((clip.start - 2.0).abs() < EPSILON);
        assert!((clip.duration - 4.0).abs() < EPSILON);
    }

    drag(
        &mut timeline,
        view,
        item(view, layer, ElementPart::HandleLeft),
        &[Point::new(21.0, 49.0), Point::new(31.0, 49.0)],
    );
    let clip = &data.borrow()[0];
    assert!((clip.start - 3.0).abs() < EPSILON);
    assert!((clip.duration - 3.0).abs() < EPSILON);
}

#[test]
fn rejected_moves_do_not_eat_later_ones() {
    let data = clips(&[(2.0, 3.0)]);
    let (mut timeline, view, layer) = with_editable(&data);

    // The first step would push the right edge past 100px; the second is
    // measured from where the pointer was, not from where the clip stayed.
    drag(
        &mut timeline,
        view,
        item(view, layer, ElementPart::Body),
        &[
            Point::new(25.0, 49.0),
            Point::new(85.0, 49.0),
            Point::new(75.0, 49.0),
        ],
    );

    assert!((data.borrow()[0].start - 1.0).abs() < EPSILON);
}

#[test]
fn edits_respect_the_layer_constraints() {
    let data = clips(&[(2.0, 3.0)]);
    let mut timeline = Timeline::new();
    let view = timeline.register(view());
    let mut segments = EditableSegmentLayer::from_datum();
    segments
        .set_data(data.clone())
        .set_edits(tempora_edit::EditConstraints::X);
    let (v, ids) = timeline.view_mut(view).expect("registered view");
    let layer = v.add_layer(segments, ids);
    timeline.set_state(EditState::new());

    drag(
        &mut timeline,
        view,
        item(view, layer, ElementPart::HandleRight),
        &[Point::new(49.0, 49.0), Point::new(59.0, 49.0)],
    );

    assert_eq!(data.borrow()[0], Clip {
        start: 2.0,
        duration: 3.0
    });
}

#[test]
fn a_drag_redraws_only_the_dragged_item() {
    let data = clips(&[(2.0, 1.0), (6.0, 1.0)]);
    let (mut timeline, view, layer) = with_editable(&data);
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let (v, _) = timeline.view_mut(view).expect("registered view");
    v.set_scene(recorder.clone());
    recorder.borrow_mut().shapes.clear();

    drag(
        &mut timeline,
        view,
        item(view, layer, ElementPart::Body),
        &[Point::new(25.0, 49.0), Point::new(35.0, 49.0)],
    );

    let recorder = recorder.borrow();
    assert!(!recorder.shapes.is_empty());
    assert!(recorder.shapes.iter().all(|(_, index, _)| *index == 0));
    assert!((data.borrow()[0].start - 3.0).abs() < EPSILON);
    assert_eq!(data.borrow()[1].start, 6.0);
}

#[test]
fn removing_a_layer_clears_its_drawing() {
    let data = clips(&[(2.0, 1.0), (6.0, 1.0)]);
    let (mut timeline, view, layer) = with_editable(&data);
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let (v, _) = timeline.view_mut(view).expect("registered view");
    v.set_scene(recorder.clone());

    assert!(v.remove_layer(layer).is_some());
    assert!(v.layer(layer).is_none());
    assert_eq!(recorder.borrow().removed, [(layer, 0), (layer, 1)]);

    // The edit state no longer reaches the removed layer.
    let drawn = recorder.borrow().shapes.len();
    drag(
        &mut timeline,
        view,
        item(view, layer, ElementPart::Body),
        &[Point::new(25.0, 49.0), Point::new(35.0, 49.0)],
    );
    assert_eq!(recorder.borrow().shapes.len(), drawn);
    assert_eq!(data.borrow()[0].start, 2.0);
}

#[test]
fn brushing_selects_then_leaving_clears() {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut timeline = Timeline::new();
    let view = timeline.register(view());
    let mut segments = SegmentLayer::from_datum();
    segments.set_data(clips(&[(1.0, 1.0), (6.0, 1.0)]));
    let (v, ids) = timeline.view_mut(view).expect("registered view");
    let layer = v.add_layer(segments, ids);
    v.layer_mut(layer)
        .expect("layer was just added")
        .params_mut()
        .set(keys::SELECTABLE, true);
    v.set_scene(recorder.clone());
    timeline.set_state(BrushState::new(BrushMode::X));

    drag(
        &mut timeline,
        view,
        EventTarget::View(view),
        &[Point::new(5.0, 40.0), Point::new(25.0, 45.0)],
    );
    assert_eq!(recorder.borrow().selected, [(0, true), (1, false)]);

    recorder.borrow_mut().selected.clear();
    timeline.set_state(EditState::new());
    assert_eq!(recorder.borrow().selected, [(0, false), (1, false)]);
}

#[test]
fn layers_that_are_not_selectable_ignore_the_brush() {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut timeline = Timeline::new();
    let view = timeline.register(view());
    let mut segments = SegmentLayer::from_datum();
    segments.set_data(clips(&[(1.0, 1.0)]));
    let (v, ids) = timeline.view_mut(view).expect("registered view");
    v.add_layer(segments, ids);
    v.set_scene(recorder.clone());
    timeline.set_state(BrushState::default());

    drag(
        &mut timeline,
        view,
        EventTarget::View(view),
        &[Point::new(0.0, 0.0), Point::new(100.0, 50.0)],
    );
    assert!(recorder.borrow().selected.is_empty());
}

#[test]
fn markers_drag_within_the_x_range() {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut timeline = Timeline::new();
    let view = timeline.register(view());
    let mut marker = MarkerLayer::new();
    marker.set_current_time(5.0);
    let (v, ids) = timeline.view_mut(view).expect("registered view");
    let layer = v.add_layer(marker, ids);
    v.set_scene(recorder.clone());
    timeline.set_state(EditState::new());
    assert_eq!(recorder.borrow().last_marker_x(), Some(50.0));

    let target = item(view, layer, ElementPart::Body);
    drag(
        &mut timeline,
        view,
        target,
        &[Point::new(50.0, 4.0), Point::new(60.0, 4.0)],
    );
    assert_eq!(recorder.borrow().last_marker_x(), Some(60.0));

    drag(
        &mut timeline,
        view,
        target,
        &[Point::new(60.0, 4.0), Point::new(110.0, 4.0)],
    );
    assert_eq!(recorder.borrow().last_marker_x(), Some(60.0));
}

#[test]
fn layers_added_before_registration_load_on_register() {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut first = view();
    first.add_layer(MarkerLayer::new(), &mut IdGenerator::new());
    first.set_scene(recorder.clone());
    assert!(!first.is_loaded());
    assert!(recorder.borrow().shapes.is_empty());

    let mut timeline = Timeline::new();
    let first = timeline.register(first);
    let mut second = view();
    second.add_layer(MarkerLayer::new(), &mut IdGenerator::new());
    let second = timeline.register(second);

    assert_eq!(recorder.borrow().shapes.len(), 1);
    assert!(timeline.surface(first).is_some());
    assert!(timeline.surface(second).is_some());

    let ids: Vec<String> = timeline
        .views()
        .iter()
        .flat_map(|(_, view)| {
            view.layers()
                .filter_map(|(_, layer)| layer.params().get_ref::<String>(keys::ID).ok().cloned())
                .collect::<Vec<_>>()
        })
        .collect();
    assert_eq!(ids, ["layer-0", "layer-1"]);
}

#[test]
fn pointer_events_carry_held_modifiers() {
    let mut timeline = Timeline::new();
    let view = timeline.register(view());
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        timeline.on_event(move |event| seen.borrow_mut().push((event.kind, event.modifiers)));
    }

    timeline.dispatch(
        SourceId::Keyboard,
        &RawInput::KeyDown {
            key: "Shift".to_owned(),
        },
    );
    timeline.dispatch(
        SourceId::Surface(view),
        &RawInput::PointerDown {
            position: Point::ZERO,
            target: EventTarget::View(view),
        },
    );
    timeline.dispatch(
        SourceId::Keyboard,
        &RawInput::KeyUp {
            key: "Shift".to_owned(),
        },
    );
    timeline.dispatch(
        SourceId::Surface(view),
        &RawInput::PointerUp {
            position: Point::ZERO,
            target: EventTarget::View(view),
        },
    );

    assert_eq!(
        *seen.borrow(),
        [
            (EventKind::KeyDown, Modifiers::SHIFT),
            (EventKind::MouseDown, Modifiers::SHIFT),
            (EventKind::KeyUp, Modifiers::empty()),
            (EventKind::MouseUp, Modifiers::empty()),
            (EventKind::Click, Modifiers::empty()),
        ]
    );
}

#[test]
fn input_for_an_unregistered_view_is_dropped() {
    let mut other = Timeline::new();
    other.register(view());
    let foreign = other.register(view());

    let mut timeline = Timeline::new();
    timeline.register(view());
    let count = Rc::new(RefCell::new(0));
    {
        let count = count.clone();
        timeline.on_event(move |_| *count.borrow_mut() += 1);
    }

    timeline.dispatch(
        SourceId::Surface(foreign),
        &RawInput::PointerDown {
            position: Point::ZERO,
            target: EventTarget::View(foreign),
        },
    );
    assert_eq!(*count.borrow(), 0);
    assert!(timeline.surface(foreign).is_none());
}
