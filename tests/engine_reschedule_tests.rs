use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use gantt_rs::api::{GanttEngine, GanttEngineConfig, RescheduleSink};
use gantt_rs::core::Viewport;
use gantt_rs::interaction::DragMode;
use gantt_rs::model::{Activity, Resource};
use gantt_rs::render::NullRenderer;

fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

type CommitLog = Rc<RefCell<Vec<(String, DateTime<Utc>, DateTime<Utc>)>>>;

#[derive(Clone, Default)]
struct RecordingSink {
    commits: CommitLog,
}

impl RescheduleSink for RecordingSink {
    fn on_reschedule(
        &mut self,
        activity_id: &str,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    ) {
        self.commits
            .borrow_mut()
            .push((activity_id.to_owned(), new_start, new_end));
    }
}

/// Week view engine with one three-day activity on one lane.
///
/// The derived range is Jan 25 .. Feb 11, so at 84 px per week the bar for
/// `a1` spans x 84..120 in row 0 (y 32..56 with the default frame style).
fn build_engine() -> (GanttEngine<NullRenderer>, CommitLog) {
    let config = GanttEngineConfig::new(Viewport::new(800, 600));
    let mut engine = GanttEngine::new(NullRenderer::default(), config).expect("engine init");
    let sink = RecordingSink::default();
    let commits = sink.commits.clone();
    engine.set_reschedule_sink(Box::new(sink));

    engine.set_resources(vec![Resource::new("press-1", "Press line 1")]);
    engine
        .set_activities(vec![Activity::new(
            "a1",
            "press-1",
            utc(2024, 2, 1),
            utc(2024, 2, 4),
        )])
        .expect("set activities");
    (engine, commits)
}

#[test]
fn move_drag_commits_once_through_the_sink() {
    let (mut engine, commits) = build_engine();

    let target = engine.pointer_down(100.0, 40.0).expect("grab the bar");
    assert_eq!(target.activity_id, "a1");
    assert_eq!(target.mode, DragMode::Move);

    // One week to the right: 84 px at 12 px per day.
    engine.pointer_move(184.0);
    let commit = engine.pointer_up().expect("commit on release");

    assert_eq!(commit.start, utc(2024, 2, 8));
    assert_eq!(commit.end, utc(2024, 2, 11));
    assert_eq!(
        commits.borrow().as_slice(),
        &[("a1".to_owned(), utc(2024, 2, 8), utc(2024, 2, 11))]
    );
    assert!(!engine.is_dragging());
}

#[test]
fn committed_bar_keeps_its_old_interval_until_a_new_snapshot() {
    let (mut engine, _commits) = build_engine();

    engine.pointer_down(100.0, 40.0).expect("grab the bar");
    engine.pointer_move(184.0);
    engine.pointer_up().expect("commit");

    // The engine never edits its snapshot; the host confirms via set_activities.
    let shown = &engine.activities()[0];
    assert_eq!(shown.start, utc(2024, 2, 1));
    assert_eq!(shown.end, utc(2024, 2, 4));

    engine
        .set_activities(vec![Activity::new(
            "a1",
            "press-1",
            utc(2024, 2, 8),
            utc(2024, 2, 11),
        )])
        .expect("confirmed snapshot");
    assert_eq!(engine.activities()[0].start, utc(2024, 2, 8));
}

#[test]
fn right_edge_resize_clamps_to_minimum_duration() {
    let (mut engine, commits) = build_engine();
    engine
        .set_activities(vec![Activity::new(
            "a2",
            "press-1",
            utc(2024, 2, 1),
            utc(2024, 2, 3),
        )])
        .expect("two-day activity");

    // Bar spans x 84..108; the right handle zone starts at 103.
    let target = engine.pointer_down(105.0, 40.0).expect("grab right edge");
    assert_eq!(target.mode, DragMode::ResizeRight);

    // Three days left would invert the bar; the end stops one day after the start.
    engine.pointer_move(105.0 - 36.0);
    let commit = engine.pointer_up().expect("commit on release");

    assert_eq!(commit.start, utc(2024, 2, 1));
    assert_eq!(commit.end, utc(2024, 2, 2));
    assert_eq!(commits.borrow().len(), 1);
}

#[test]
fn left_edge_resize_moves_only_the_start() {
    let (mut engine, commits) = build_engine();

    let target = engine.pointer_down(86.0, 40.0).expect("grab left edge");
    assert_eq!(target.mode, DragMode::ResizeLeft);

    engine.pointer_move(86.0 + 24.0);
    let commit = engine.pointer_up().expect("commit on release");

    assert_eq!(commit.start, utc(2024, 2, 3));
    assert_eq!(commit.end, utc(2024, 2, 4));
    assert_eq!(commits.borrow().len(), 1);
}

#[test]
fn release_without_movement_recommits_the_interval() {
    let (mut engine, commits) = build_engine();

    engine.pointer_down(100.0, 40.0).expect("grab the bar");
    let commit = engine.pointer_up().expect("zero-delta commit");

    assert_eq!(commit.start, utc(2024, 2, 1));
    assert_eq!(commit.end, utc(2024, 2, 4));
    assert_eq!(commits.borrow().len(), 1);
}

#[test]
fn cancel_emits_nothing() {
    let (mut engine, commits) = build_engine();

    engine.pointer_down(100.0, 40.0).expect("grab the bar");
    engine.pointer_move(184.0);
    assert!(engine.cancel_gesture());

    assert!(!engine.is_dragging());
    assert!(engine.pointer_up().is_none());
    assert!(commits.borrow().is_empty());
}

#[test]
fn read_only_mode_refuses_new_gestures() {
    let (mut engine, commits) = build_engine();
    engine.set_read_only(true);

    assert!(engine.pointer_down(100.0, 40.0).is_none());
    assert!(!engine.is_dragging());
    assert!(commits.borrow().is_empty());
}

#[test]
fn enabling_read_only_cancels_an_active_drag() {
    let (mut engine, commits) = build_engine();

    engine.pointer_down(100.0, 40.0).expect("grab the bar");
    engine.pointer_move(184.0);
    engine.set_read_only(true);

    assert!(!engine.is_dragging());
    assert!(engine.pointer_up().is_none());
    assert!(commits.borrow().is_empty());
}

#[test]
fn replacing_the_snapshot_cancels_an_active_drag() {
    let (mut engine, commits) = build_engine();

    engine.pointer_down(100.0, 40.0).expect("grab the bar");
    engine
        .set_activities(vec![Activity::new(
            "a1",
            "press-1",
            utc(2024, 3, 1),
            utc(2024, 3, 4),
        )])
        .expect("fresh snapshot");

    assert!(!engine.is_dragging());
    assert!(engine.pointer_up().is_none());
    assert!(commits.borrow().is_empty());
}

#[test]
fn press_on_empty_canvas_is_a_no_op() {
    let (mut engine, commits) = build_engine();

    assert!(engine.pointer_down(400.0, 300.0).is_none());
    assert!(engine.pointer_down(100.0, 10.0).is_none());
    assert!(!engine.is_dragging());
    assert!(commits.borrow().is_empty());
}

#[test]
fn stale_pointer_events_are_ignored() {
    let (mut engine, commits) = build_engine();

    assert!(engine.pointer_move(150.0).is_none());
    assert!(engine.pointer_up().is_none());
    assert!(commits.borrow().is_empty());
}

#[test]
fn second_pointer_down_keeps_the_first_gesture() {
    let (mut engine, commits) = build_engine();

    engine.pointer_down(100.0, 40.0).expect("grab the bar");
    assert!(engine.pointer_down(100.0, 40.0).is_none());

    engine.pointer_move(184.0);
    engine.pointer_up().expect("single commit");
    assert_eq!(commits.borrow().len(), 1);
}

#[test]
fn drag_proposal_is_observable_mid_gesture() {
    let (mut engine, _commits) = build_engine();

    engine.pointer_down(100.0, 40.0).expect("grab the bar");
    engine.pointer_move(112.0);

    assert!(engine.is_dragging());
    let proposal = engine.drag_proposal().expect("mid-gesture proposal");
    assert_eq!(proposal.start, utc(2024, 2, 2));
    assert_eq!(proposal.end, utc(2024, 2, 5));
}

#[test]
fn hit_test_resolves_edge_zones_and_misses() {
    let (engine, _commits) = build_engine();

    let left = engine.hit_test(86.0, 40.0).expect("left handle");
    assert_eq!(left.mode, DragMode::ResizeLeft);

    let right = engine.hit_test(118.0, 40.0).expect("right handle");
    assert_eq!(right.mode, DragMode::ResizeRight);

    let body = engine.hit_test(100.0, 40.0).expect("bar body");
    assert_eq!(body.mode, DragMode::Move);

    assert!(engine.hit_test(100.0, 100.0).is_none());
    assert!(engine.hit_test(300.0, 40.0).is_none());
}

#[test]
fn narrow_bars_drag_as_plain_moves() {
    let (mut engine, _commits) = build_engine();
    engine
        .set_activities(vec![Activity::new(
            "short",
            "press-1",
            utc(2024, 2, 1),
            utc(2024, 2, 2),
        )])
        .expect("one-day activity");

    // Twelve pixels wide: too narrow for distinct edge handles.
    let target = engine.pointer_down(85.0, 40.0).expect("grab the bar");
    assert_eq!(target.mode, DragMode::Move);
}

#[test]
fn gestures_work_without_a_sink() {
    let config = GanttEngineConfig::new(Viewport::new(800, 600));
    let mut engine = GanttEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_resources(vec![Resource::new("press-1", "Press line 1")]);
    engine
        .set_activities(vec![Activity::new(
            "a1",
            "press-1",
            utc(2024, 2, 1),
            utc(2024, 2, 4),
        )])
        .expect("set activities");

    engine.pointer_down(100.0, 40.0).expect("grab the bar");
    engine.pointer_move(184.0);
    let commit = engine.pointer_up().expect("commit without sink");
    assert_eq!(commit.start, utc(2024, 2, 8));
}
