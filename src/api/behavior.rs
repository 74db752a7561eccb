use serde::{Deserialize, Serialize};

use crate::extensions::MarkerPlacementConfig;

/// Bounds for the continuous zoom multiplier.
///
/// Zoom requests outside the bounds clamp instead of failing; only
/// structurally broken limits are rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min_factor: f64,
    pub max_factor: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_factor: 0.5,
            max_factor: 3.0,
        }
    }
}

impl ZoomLimits {
    #[must_use]
    pub fn clamp(self, factor: f64) -> f64 {
        factor.clamp(self.min_factor, self.max_factor)
    }
}

/// Pixel metrics of the generated timeline frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStyle {
    /// Height of one resource row.
    pub row_height_px: f64,
    /// Vertical gap between rows.
    pub lane_gap_px: f64,
    /// Inset between a row's edges and the bars inside it.
    pub bar_inset_px: f64,
    /// Height reserved for the axis header above the first row.
    pub header_height_px: f64,
    /// Weekend bands are skipped once a day shrinks below this width.
    pub weekend_band_min_px_per_day: f64,
    #[serde(default)]
    pub marker_placement: MarkerPlacementConfig,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            row_height_px: 32.0,
            lane_gap_px: 4.0,
            bar_inset_px: 4.0,
            header_height_px: 28.0,
            weekend_band_min_px_per_day: 3.0,
            marker_placement: MarkerPlacementConfig::default(),
        }
    }
}

impl FrameStyle {
    /// Full height of one row slot, gap included.
    #[must_use]
    pub fn row_stride_px(self) -> f64 {
        self.row_height_px + self.lane_gap_px
    }
}
