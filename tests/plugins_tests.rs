use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use gantt_rs::GanttError;
use gantt_rs::api::{GanttEngine, GanttEngineConfig};
use gantt_rs::core::{TimeUnit, Viewport};
use gantt_rs::extensions::{GanttPlugin, PluginContext, PluginEvent};
use gantt_rs::model::{Activity, Resource};
use gantt_rs::render::NullRenderer;

fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<PluginEvent>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<PluginEvent>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl GanttPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &PluginEvent, _context: PluginContext) {
        self.events.borrow_mut().push(event.clone());
    }
}

fn event_kind(event: &PluginEvent) -> &'static str {
    match event {
        PluginEvent::DataUpdated { .. } => "data",
        PluginEvent::LayoutWarnings { .. } => "warnings",
        PluginEvent::VisibleRangeChanged { .. } => "range",
        PluginEvent::GranularityChanged { .. } => "granularity",
        PluginEvent::ZoomChanged { .. } => "zoom",
        PluginEvent::ScrollChanged { .. } => "scroll",
        PluginEvent::GestureStarted { .. } => "gesture_start",
        PluginEvent::GestureCancelled => "gesture_cancel",
        PluginEvent::ActivityRescheduled { .. } => "reschedule",
        PluginEvent::Rendered => "rendered",
    }
}

fn engine_under_test() -> GanttEngine<NullRenderer> {
    let config = GanttEngineConfig::new(Viewport::new(800, 600));
    GanttEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn press_activity() -> Activity {
    Activity::new("a1", "press-1", utc(2024, 2, 1), utc(2024, 2, 4))
}

/// Drives one full host session and checks the exact event sequence.
///
/// Day granularity at zoom 2.0 gives 48 px per day, so the Feb 1 bar spans
/// content x 336..480; with 10 px of scroll a press at viewport x 400 lands
/// mid-bar and a move to x 448 drags exactly one day.
#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut engine = engine_under_test();
    let events = Rc::new(RefCell::new(Vec::<PluginEvent>::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    engine.set_resources(vec![Resource::new("press-1", "Press 1")]);
    engine
        .set_activities(vec![press_activity()])
        .expect("set activities");
    engine.set_granularity(TimeUnit::Day).expect("set granularity");
    engine.set_granularity(TimeUnit::Day).expect("repeat is a no-op");
    engine.set_zoom(2.0).expect("set zoom");
    engine.set_zoom(2.0).expect("repeat is a no-op");
    engine.set_scroll_offset_px(10.0).expect("set scroll");
    engine.pointer_down(400.0, 40.0).expect("press grabs the bar");
    engine.pointer_move(448.0).expect("proposal while dragging");
    engine.pointer_up().expect("commit on release");
    engine.render().expect("render");

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(event_kind).collect();
    assert_eq!(
        kinds,
        vec![
            "data",
            "range",
            "data",
            "granularity",
            "zoom",
            "scroll",
            "gesture_start",
            "reschedule",
            "rendered",
        ]
    );

    match &events[1] {
        PluginEvent::VisibleRangeChanged { start, end } => {
            assert_eq!(*start, utc(2024, 1, 25));
            assert_eq!(*end, utc(2024, 2, 11));
        }
        other => panic!("expected range event, got {other:?}"),
    }
    match &events[7] {
        PluginEvent::ActivityRescheduled {
            activity_id,
            start,
            end,
        } => {
            assert_eq!(activity_id, "a1");
            assert_eq!(*start, utc(2024, 2, 2));
            assert_eq!(*end, utc(2024, 2, 5));
        }
        other => panic!("expected reschedule event, got {other:?}"),
    }
}

#[test]
fn cancelled_gesture_emits_no_reschedule() {
    let mut engine = engine_under_test();
    let events = Rc::new(RefCell::new(Vec::<PluginEvent>::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    engine.set_resources(vec![Resource::new("press-1", "Press 1")]);
    engine
        .set_activities(vec![press_activity()])
        .expect("set activities");
    events.borrow_mut().clear();

    engine.pointer_down(100.0, 40.0).expect("press grabs the bar");
    engine.pointer_move(150.0).expect("proposal while dragging");
    assert!(engine.cancel_gesture());

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(event_kind).collect();
    assert_eq!(kinds, vec!["gesture_start", "gesture_cancel"]);
}

#[test]
fn layout_warnings_event_carries_the_count() {
    let mut engine = engine_under_test();
    let events = Rc::new(RefCell::new(Vec::<PluginEvent>::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    // No resources registered, so the activity has nowhere to land.
    engine
        .set_activities(vec![Activity::new(
            "orphan",
            "ghost",
            utc(2024, 2, 1),
            utc(2024, 2, 4),
        )])
        .expect("set activities");

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(event_kind).collect();
    assert_eq!(kinds, vec!["range", "data", "warnings"]);
    match events.last() {
        Some(PluginEvent::LayoutWarnings { count }) => assert_eq!(*count, 1),
        other => panic!("expected warnings event, got {other:?}"),
    }
}

#[test]
fn duplicate_plugin_ids_are_rejected() {
    let mut engine = engine_under_test();
    let events = Rc::new(RefCell::new(Vec::<PluginEvent>::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("dupe", events.clone())))
        .expect("first plugin");
    let err = engine
        .register_plugin(Box::new(RecordingPlugin::new("dupe", events)))
        .expect_err("duplicate must fail");
    assert!(matches!(err, GanttError::InvalidData(_)));
}

#[test]
fn empty_plugin_id_is_rejected() {
    let mut engine = engine_under_test();
    let events = Rc::new(RefCell::new(Vec::<PluginEvent>::new()));
    let err = engine
        .register_plugin(Box::new(RecordingPlugin::new("", events)))
        .expect_err("empty id must fail");
    assert!(matches!(err, GanttError::InvalidData(_)));
}

#[test]
fn unregister_plugin_stops_dispatch() {
    let mut engine = engine_under_test();
    let events = Rc::new(RefCell::new(Vec::<PluginEvent>::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("to-remove", events.clone())))
        .expect("register");
    assert_eq!(engine.plugin_count(), 1);
    assert!(engine.has_plugin("to-remove"));

    engine.set_resources(vec![Resource::new("press-1", "Press 1")]);
    assert!(engine.unregister_plugin("to-remove"));
    assert_eq!(engine.plugin_count(), 0);
    assert!(!engine.has_plugin("to-remove"));

    engine.set_resources(vec![
        Resource::new("press-1", "Press 1"),
        Resource::new("press-2", "Press 2"),
    ]);
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn plugins_run_in_registration_order() {
    struct OrderProbe {
        id: String,
        order: Rc<RefCell<Vec<(String, &'static str)>>>,
    }
    impl GanttPlugin for OrderProbe {
        fn id(&self) -> &str {
            &self.id
        }
        fn on_event(&mut self, event: &PluginEvent, _context: PluginContext) {
            self.order
                .borrow_mut()
                .push((self.id.clone(), event_kind(event)));
        }
    }

    let mut engine = engine_under_test();
    let order: Rc<RefCell<Vec<(String, &'static str)>>> = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(OrderProbe {
            id: "axis-probe".to_owned(),
            order: Rc::clone(&order),
        }))
        .expect("first plugin");
    engine
        .register_plugin(Box::new(OrderProbe {
            id: "audit-log".to_owned(),
            order: Rc::clone(&order),
        }))
        .expect("second plugin");
    assert_eq!(engine.plugin_count(), 2);

    engine.set_resources(vec![Resource::new("press-1", "Press 1")]);

    assert_eq!(
        *order.borrow(),
        vec![
            ("axis-probe".to_owned(), "data"),
            ("audit-log".to_owned(), "data"),
        ]
    );
}

#[test]
fn context_snapshots_track_engine_state() {
    struct ContextProbe {
        id: String,
        seen: Rc<RefCell<Vec<(&'static str, PluginContext)>>>,
    }
    impl GanttPlugin for ContextProbe {
        fn id(&self) -> &str {
            &self.id
        }
        fn on_event(&mut self, event: &PluginEvent, context: PluginContext) {
            self.seen.borrow_mut().push((event_kind(event), context));
        }
    }

    let mut engine = engine_under_test();
    let seen: Rc<RefCell<Vec<(&'static str, PluginContext)>>> = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(ContextProbe {
            id: "context-probe".to_owned(),
            seen: Rc::clone(&seen),
        }))
        .expect("register plugin");

    engine.set_resources(vec![Resource::new("press-1", "Press 1")]);
    engine
        .set_activities(vec![press_activity()])
        .expect("set activities");
    // 24 px per day at zoom 2.0, so the Feb 1 bar spans x 168..240.
    engine.set_zoom(2.0).expect("set zoom");
    engine.pointer_down(200.0, 40.0).expect("press grabs the bar");
    engine.pointer_up().expect("commit on release");

    let context_at = |kind: &str| -> PluginContext {
        seen.borrow()
            .iter()
            .find(|(seen_kind, _)| *seen_kind == kind)
            .map(|(_, context)| *context)
            .unwrap_or_else(|| panic!("no {kind} event recorded"))
    };

    let at_data = context_at("data");
    assert_eq!(at_data.viewport, Viewport::new(800, 600));
    assert_eq!(at_data.resources_len, 1);
    assert_eq!(at_data.activities_len, 0);
    assert!(!at_data.read_only);

    let at_zoom = context_at("zoom");
    assert_eq!(at_zoom.zoom_factor, 2.0);
    assert_eq!(at_zoom.unit, TimeUnit::Week);
    assert_eq!(at_zoom.range.start(), utc(2024, 1, 25));

    let mid_gesture = context_at("gesture_start");
    assert!(mid_gesture.dragging);

    let after_commit = context_at("reschedule");
    assert!(!after_commit.dragging);
}

#[test]
fn late_plugins_see_only_later_events() {
    let mut engine = engine_under_test();
    engine.set_resources(vec![Resource::new("press-1", "Press 1")]);

    let events = Rc::new(RefCell::new(Vec::<PluginEvent>::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("latecomer", events.clone())))
        .expect("register plugin");
    engine.set_granularity(TimeUnit::Day).expect("set granularity");

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(event_kind).collect();
    assert_eq!(kinds, vec!["granularity"]);
}
