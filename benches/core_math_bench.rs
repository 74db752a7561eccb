use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use gantt_rs::api::{GanttEngine, GanttEngineConfig};
use gantt_rs::core::{DateRange, LaneLayout, TimeScale, TimeUnit, Viewport};
use gantt_rs::model::{Activity, Resource};
use gantt_rs::render::NullRenderer;
use std::hint::black_box;

fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn press_lines(count: usize) -> Vec<Resource> {
    (0..count)
        .map(|i| Resource::new(format!("press-{i}"), format!("Press {i}")))
        .collect()
}

fn scheduled_activities(count: usize, lines: usize) -> Vec<Activity> {
    (0..count)
        .map(|i| {
            let start = utc(2024, 1, 8) + Duration::days((i / lines) as i64 * 2);
            let end = start + Duration::days(1 + (i % 3) as i64);
            Activity::new(format!("a{i}"), format!("press-{}", i % lines), start, end)
        })
        .collect()
}

fn bench_time_scale_round_trip(c: &mut Criterion) {
    let range = DateRange::new(utc(2024, 1, 1), utc(2025, 1, 1)).expect("valid range");
    let scale = TimeScale::new(range, TimeUnit::Week, 84.0).expect("valid scale");
    let date = utc(2024, 7, 17);

    c.bench_function("time_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.date_to_position(date);
            let _ = scale.position_to_date(px + 0.25).expect("from position");
        })
    });
}

fn bench_lane_layout_2k(c: &mut Criterion) {
    let resources = press_lines(40);
    let activities = scheduled_activities(2_000, 40);

    c.bench_function("lane_layout_2k", |b| {
        b.iter(|| {
            let layout = LaneLayout::build(black_box(&activities), black_box(&resources));
            let _ = black_box(layout.lane_count());
        })
    });
}

fn bench_frame_build_2k(c: &mut Criterion) {
    let renderer = NullRenderer::default();
    let config = GanttEngineConfig::new(Viewport::new(1600, 900));
    let mut engine = GanttEngine::new(renderer, config).expect("engine init");
    engine.set_resources(press_lines(40));
    engine
        .set_activities(scheduled_activities(2_000, 40))
        .expect("set activities");

    c.bench_function("frame_build_2k", |b| {
        b.iter(|| {
            let frame = engine.build_frame().expect("frame build should succeed");
            let _ = black_box(frame.bars.len());
        })
    });
}

criterion_group!(
    benches,
    bench_time_scale_round_trip,
    bench_lane_layout_2k,
    bench_frame_build_2k
);
criterion_main!(benches);
