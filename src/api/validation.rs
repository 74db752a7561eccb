use crate::error::{GanttError, GanttResult};

use super::{FrameStyle, ZoomLimits};

pub(super) fn validate_zoom_limits(limits: ZoomLimits) -> GanttResult<ZoomLimits> {
    if !limits.min_factor.is_finite() || !limits.max_factor.is_finite() {
        return Err(GanttError::InvalidConfig(
            "zoom limits must be finite".to_owned(),
        ));
    }
    if limits.min_factor <= 0.0 || limits.min_factor > limits.max_factor {
        return Err(GanttError::InvalidConfig(format!(
            "zoom limits must satisfy 0 < min <= max, got min={}, max={}",
            limits.min_factor, limits.max_factor
        )));
    }
    Ok(limits)
}

pub(super) fn validate_zoom_factor(factor: f64) -> GanttResult<f64> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(GanttError::InvalidConfig(format!(
            "zoom factor must be finite and > 0, got {factor}"
        )));
    }
    Ok(factor)
}

pub(super) fn validate_scroll_offset(offset_px: f64) -> GanttResult<f64> {
    if !offset_px.is_finite() {
        return Err(GanttError::InvalidData(
            "scroll offset must be finite".to_owned(),
        ));
    }
    Ok(offset_px)
}

pub(super) fn validate_frame_style(style: FrameStyle) -> GanttResult<FrameStyle> {
    for (value, name) in [
        (style.row_height_px, "row_height_px"),
        (style.lane_gap_px, "lane_gap_px"),
        (style.bar_inset_px, "bar_inset_px"),
        (style.header_height_px, "header_height_px"),
        (
            style.weekend_band_min_px_per_day,
            "weekend_band_min_px_per_day",
        ),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(GanttError::InvalidConfig(format!(
                "frame style `{name}` must be finite and >= 0"
            )));
        }
    }
    if style.row_height_px <= 2.0 * style.bar_inset_px {
        return Err(GanttError::InvalidConfig(format!(
            "row height {} leaves no room for bars with inset {}",
            style.row_height_px, style.bar_inset_px
        )));
    }
    Ok(style)
}
