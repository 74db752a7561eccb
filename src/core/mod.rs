pub mod calendar;
pub mod lane;
pub mod range;
pub mod time_scale;
pub mod types;

pub use lane::{Lane, LaneLayout, LayoutWarning};
pub use range::{RangeTuning, compute_range, fallback_month_range};
pub use time_scale::TimeScale;
pub use types::{DateRange, TimeUnit, Viewport};
