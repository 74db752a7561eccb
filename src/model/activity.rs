use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Display category of an activity bar.
///
/// Purely presentational: scheduling math never branches on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Production,
    Changeover,
    Downtime,
    Maintenance,
    ResourceUnavailable,
}

impl Default for ActivityKind {
    fn default() -> Self {
        ActivityKind::Production
    }
}

/// A scheduled interval of work or downtime on one resource lane.
///
/// The engine treats activities as immutable snapshot data: gestures propose
/// a new `(start, end)` pair through the commit channel, they never mutate
/// the activity in place. The interval invariant `end > start` is expected
/// but not enforced here; violations are reported by the lane layout and the
/// activity is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique, stable identifier.
    pub id: String,
    /// Owning resource lane.
    pub resource_id: String,
    /// Display category.
    pub kind: ActivityKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Completion percentage 0..=100, display-only.
    pub progress: Option<u8>,
    /// Human-readable caption, display-only.
    pub label: Option<String>,
}

impl Activity {
    pub fn new(
        id: impl Into<String>,
        resource_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            resource_id: resource_id.into(),
            kind: ActivityKind::default(),
            start,
            end,
            progress: None,
            label: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ActivityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the completion percentage, clamped to 100.
    #[must_use]
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress.min(100));
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn has_valid_interval(&self) -> bool {
        self.end > self.start
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}
