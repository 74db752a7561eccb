use serde::{Deserialize, Serialize};

/// A lane owner: a machine, line, or crew that activities are scheduled on.
///
/// Resources carry identity and display data only. The order in which the
/// host supplies them is the order their lanes appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique, stable identifier referenced by `Activity::resource_id`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional grouping header, e.g. a production area.
    pub group: Option<String>,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group: None,
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}
