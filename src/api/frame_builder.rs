use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use tracing::trace;

use crate::core::{TimeUnit, calendar};
use crate::error::{GanttError, GanttResult};
use crate::extensions::place_markers;
use crate::render::{BarGeometry, LaneRow, MarkerDot, Renderer, TickMark, TimeBand, TimelineFrame};

use super::GanttEngine;

impl<R: Renderer> GanttEngine<R> {
    /// Materializes the backend-agnostic scene for one draw pass.
    ///
    /// All geometry lands in viewport space with the scroll offset applied
    /// and off-screen pieces culled. A bar under an active drag shows its
    /// current proposal instead of the committed interval.
    pub fn build_frame(&self) -> GanttResult<TimelineFrame> {
        if !self.viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let mut frame = TimelineFrame::new(self.viewport, self.scale.content_width());
        self.append_lane_rows(&mut frame);
        self.append_axis_ticks(&mut frame);
        if self.show_non_working_periods {
            self.append_weekend_bands(&mut frame);
        }
        self.append_activity_bars(&mut frame);
        self.append_marker_dots(&mut frame)?;

        trace!(
            lanes = frame.lane_rows.len(),
            bars = frame.bars.len(),
            ticks = frame.ticks.len(),
            bands = frame.bands.len(),
            markers = frame.markers.len(),
            "timeline frame built"
        );
        Ok(frame)
    }

    /// Top edge of the lane row at `index`, below the axis header.
    pub(super) fn lane_row_y(&self, index: usize) -> f64 {
        self.frame_style.header_height_px + index as f64 * self.frame_style.row_stride_px()
    }

    /// Viewport-space rectangle of a bar spanning `start..end` inside the
    /// row whose top edge sits at `row_y`. Returns `(x, y, width, height)`.
    pub(super) fn bar_rect(
        &self,
        row_y: f64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> (f64, f64, f64, f64) {
        let left = self.scale.date_to_position(start) - self.scroll_offset_px;
        let right = self.scale.date_to_position(end) - self.scroll_offset_px;
        let y = row_y + self.frame_style.bar_inset_px;
        let height = (self.frame_style.row_height_px - 2.0 * self.frame_style.bar_inset_px).max(0.0);
        (left, y, (right - left).max(0.0), height)
    }

    fn append_lane_rows(&self, frame: &mut TimelineFrame) {
        for (index, lane) in self.layout.lanes().enumerate() {
            frame.lane_rows.push(LaneRow {
                resource_id: lane.resource.id.clone(),
                name: lane.resource.name.clone(),
                y: self.lane_row_y(index),
                height: self.frame_style.row_height_px,
            });
        }
    }

    fn append_axis_ticks(&self, frame: &mut TimelineFrame) {
        let viewport_width = f64::from(self.viewport.width);
        for date in self.scale.ticks() {
            let x = self.scale.date_to_position(date) - self.scroll_offset_px;
            if x < 0.0 || x > viewport_width {
                continue;
            }
            frame.ticks.push(TickMark {
                date,
                x,
                label: tick_label(date, self.scale.unit()),
            });
        }
    }

    fn append_weekend_bands(&self, frame: &mut TimelineFrame) {
        let px_per_day = self.scale.px_per_day();
        if px_per_day < self.frame_style.weekend_band_min_px_per_day {
            return;
        }
        let Some((first, last)) = self.visible_day_window() else {
            return;
        };

        let viewport_width = f64::from(self.viewport.width);
        let range_end = self.scale.range().end();
        for day in first.iter_days().take_while(|day| *day <= last) {
            if !calendar::is_weekend(day) {
                continue;
            }
            let start = day.and_time(NaiveTime::MIN).and_utc();
            // A day strip starting at the range end has no column to shade.
            if start >= range_end {
                break;
            }
            let x = self.scale.date_to_position(start) - self.scroll_offset_px;
            if x + px_per_day < 0.0 || x > viewport_width {
                continue;
            }
            frame.bands.push(TimeBand {
                x,
                width: px_per_day,
            });
        }
    }

    fn append_activity_bars(&self, frame: &mut TimelineFrame) {
        let viewport_width = f64::from(self.viewport.width);
        let drag = self.gesture.drag_context();
        for (index, lane) in self.layout.lanes().enumerate() {
            let row_y = self.lane_row_y(index);
            for activity in &lane.activities {
                let (start, end, dragging) = match drag {
                    Some(context) if context.activity_id == activity.id => {
                        (context.proposal.start, context.proposal.end, true)
                    }
                    _ => (activity.start, activity.end, false),
                };
                let (x, y, width, height) = self.bar_rect(row_y, start, end);
                if x + width < 0.0 || x > viewport_width {
                    continue;
                }
                frame.bars.push(BarGeometry {
                    activity_id: activity.id.clone(),
                    resource_id: activity.resource_id.clone(),
                    kind: activity.kind,
                    x,
                    y,
                    width,
                    height,
                    progress: activity.progress,
                    label: activity.label.clone(),
                    dragging,
                });
            }
        }
    }

    fn append_marker_dots(&self, frame: &mut TimelineFrame) -> GanttResult<()> {
        if self.markers.is_empty() {
            return Ok(());
        }
        let placed = place_markers(
            &self.markers,
            self.scale,
            f64::from(self.viewport.width),
            self.scroll_offset_px,
            self.frame_style.marker_placement,
        )?;
        for marker in placed {
            frame.markers.push(MarkerDot {
                marker_id: marker.id,
                x: marker.x,
                lane: marker.lane,
                label: marker.label,
                emphasized: marker.emphasized,
            });
        }
        Ok(())
    }

    /// Day span currently inside the viewport, clipped to the scale range
    /// with one day of margin at each edge.
    fn visible_day_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        let range = self.scale.range();
        let viewport_width = f64::from(self.viewport.width);
        let left = self.scale.position_to_date(self.scroll_offset_px).ok()?;
        let right = self
            .scale
            .position_to_date(self.scroll_offset_px + viewport_width)
            .ok()?;
        let first = (left - Duration::days(1)).max(range.start()).date_naive();
        let last = (right + Duration::days(1)).min(range.end()).date_naive();
        (first <= last).then_some((first, last))
    }
}

/// Axis label for a tick at the given granularity.
fn tick_label(date: DateTime<Utc>, unit: TimeUnit) -> String {
    match unit {
        TimeUnit::Day | TimeUnit::Week => date.format("%d %b").to_string(),
        TimeUnit::Month => date.format("%b %Y").to_string(),
        TimeUnit::Quarter => {
            let quarter = date.month0() / 3 + 1;
            format!("Q{quarter} {}", date.year())
        }
    }
}
