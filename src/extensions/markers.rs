use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::TimeScale;
use crate::error::{GanttError, GanttResult};

/// Host-supplied milestone annotation pinned to the time axis, such as an
/// order due date or a planning freeze line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineMarker {
    pub id: String,
    pub date: DateTime<Utc>,
    pub label: Option<String>,
    pub emphasized: bool,
    /// Higher priority wins lane 0 when markers collide.
    pub priority: i32,
}

impl TimelineMarker {
    #[must_use]
    pub fn new(id: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            date,
            label: None,
            emphasized: false,
            priority: 0,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_emphasis(mut self) -> Self {
        self.emphasized = true;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPlacementConfig {
    pub marker_size_px: f64,
    pub label_char_width_px: f64,
    pub label_horizontal_padding_px: f64,
    pub min_horizontal_gap_px: f64,
}

impl Default for MarkerPlacementConfig {
    fn default() -> Self {
        Self {
            marker_size_px: 8.0,
            label_char_width_px: 7.0,
            label_horizontal_padding_px: 6.0,
            min_horizontal_gap_px: 2.0,
        }
    }
}

impl MarkerPlacementConfig {
    fn validate(self) -> GanttResult<Self> {
        for (value, name) in [
            (self.marker_size_px, "marker_size_px"),
            (self.label_char_width_px, "label_char_width_px"),
            (
                self.label_horizontal_padding_px,
                "label_horizontal_padding_px",
            ),
            (self.min_horizontal_gap_px, "min_horizontal_gap_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GanttError::InvalidConfig(format!(
                    "marker config `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// A marker resolved to viewport space with a collision-free stacking lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedMarker {
    pub id: String,
    pub date: DateTime<Utc>,
    pub x: f64,
    /// Stacking row: markers whose labels would collide move to higher lanes.
    pub lane: usize,
    pub label: Option<String>,
    pub label_width_px: Option<f64>,
    pub emphasized: bool,
    pub collision_left_px: f64,
    pub collision_right_px: f64,
}

/// Places markers on the axis with deterministic collision rules.
///
/// Positions are viewport-space (`scroll_offset_px` already subtracted) and
/// markers fully outside the viewport are culled. Placement order is stable
/// by x, priority (desc), then marker id.
pub fn place_markers(
    markers: &[TimelineMarker],
    scale: TimeScale,
    viewport_width_px: f64,
    scroll_offset_px: f64,
    config: MarkerPlacementConfig,
) -> GanttResult<Vec<PlacedMarker>> {
    let config = config.validate()?;
    if markers.is_empty() {
        return Ok(Vec::new());
    }
    if !viewport_width_px.is_finite() || !scroll_offset_px.is_finite() {
        return Err(GanttError::InvalidData(
            "marker placement offsets must be finite".to_owned(),
        ));
    }

    let mut prepared = Vec::with_capacity(markers.len());
    for (index, marker) in markers.iter().enumerate() {
        let x = scale.date_to_position(marker.date) - scroll_offset_px;
        let label_width = label_width(marker.label.as_deref(), config);
        let span_half = 0.5 * config.marker_size_px.max(label_width.unwrap_or(0.0));
        let left = x - span_half;
        let right = x + span_half;
        if right < 0.0 || left > viewport_width_px {
            continue;
        }
        prepared.push(Prepared {
            index,
            marker,
            x,
            left,
            right,
            label_width,
        });
    }

    prepared.sort_by(|a, b| {
        OrderedFloat(a.x)
            .cmp(&OrderedFloat(b.x))
            .then_with(|| b.marker.priority.cmp(&a.marker.priority))
            .then_with(|| a.marker.id.cmp(&b.marker.id))
            .then_with(|| a.index.cmp(&b.index))
    });

    let mut lane_last_right = Vec::<f64>::new();
    let mut placed = Vec::with_capacity(prepared.len());
    for item in prepared {
        let lane = allocate_lane(
            &mut lane_last_right,
            item.left,
            item.right,
            config.min_horizontal_gap_px,
        );
        placed.push(PlacedMarker {
            id: item.marker.id.clone(),
            date: item.marker.date,
            x: item.x,
            lane,
            label: item.marker.label.clone(),
            label_width_px: item.label_width,
            emphasized: item.marker.emphasized,
            collision_left_px: item.left,
            collision_right_px: item.right,
        });
    }

    Ok(placed)
}

#[derive(Debug)]
struct Prepared<'a> {
    index: usize,
    marker: &'a TimelineMarker,
    x: f64,
    left: f64,
    right: f64,
    label_width: Option<f64>,
}

fn label_width(text: Option<&str>, config: MarkerPlacementConfig) -> Option<f64> {
    text.map(|value| {
        value.chars().count() as f64 * config.label_char_width_px
            + 2.0 * config.label_horizontal_padding_px
    })
}

fn allocate_lane(last_right: &mut Vec<f64>, left: f64, right: f64, min_gap: f64) -> usize {
    for (lane, lane_last_right) in last_right.iter_mut().enumerate() {
        if left >= *lane_last_right + min_gap {
            *lane_last_right = right;
            return lane;
        }
    }
    last_right.push(right);
    last_right.len() - 1
}
