use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Activity, Resource};

/// Why an activity was excluded from the lane layout.
///
/// Exclusions are reported, never thrown: a malformed activity drops out of
/// the view while everything else keeps rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutWarning {
    /// The activity points at a resource missing from the snapshot.
    UnknownResource {
        activity_id: String,
        resource_id: String,
    },
    /// The activity interval is empty or inverted (`end <= start`).
    InvalidInterval { activity_id: String },
}

/// One resource's track: the resource plus its activities in start order.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub resource: Resource,
    pub activities: Vec<Activity>,
}

/// Per-resource activity grouping.
///
/// Lanes iterate in resource snapshot order, every supplied resource gets a
/// lane even when it has no activities, and activities within a lane are
/// sorted by start time with the id as tie-breaker. Overlapping activities
/// on one lane are kept side by side; the layout does not detect or resolve
/// schedule conflicts.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneLayout {
    lanes: IndexMap<String, Lane>,
    warnings: Vec<LayoutWarning>,
}

impl LaneLayout {
    /// Groups `activities` into lanes keyed by `resources`.
    ///
    /// Pure function of its inputs: identical snapshots produce identical
    /// layouts, including warning order.
    #[must_use]
    pub fn build(activities: &[Activity], resources: &[Resource]) -> Self {
        let mut lanes: IndexMap<String, Lane> = resources
            .iter()
            .map(|resource| {
                (
                    resource.id.clone(),
                    Lane {
                        resource: resource.clone(),
                        activities: Vec::new(),
                    },
                )
            })
            .collect();

        let mut warnings = Vec::new();
        for activity in activities {
            if !activity.has_valid_interval() {
                warnings.push(LayoutWarning::InvalidInterval {
                    activity_id: activity.id.clone(),
                });
                continue;
            }
            match lanes.get_mut(&activity.resource_id) {
                Some(lane) => lane.activities.push(activity.clone()),
                None => warnings.push(LayoutWarning::UnknownResource {
                    activity_id: activity.id.clone(),
                    resource_id: activity.resource_id.clone(),
                }),
            }
        }

        for lane in lanes.values_mut() {
            lane.activities
                .sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        }

        debug!(
            lanes = lanes.len(),
            placed = lanes.values().map(|lane| lane.activities.len()).sum::<usize>(),
            excluded = warnings.len(),
            "built lane layout"
        );

        Self { lanes, warnings }
    }

    pub fn lanes(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.values()
    }

    #[must_use]
    pub fn lane(&self, resource_id: &str) -> Option<&Lane> {
        self.lanes.get(resource_id)
    }

    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    #[must_use]
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }
}

impl Default for LaneLayout {
    fn default() -> Self {
        Self {
            lanes: IndexMap::new(),
            warnings: Vec::new(),
        }
    }
}
