use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document header saved next to the node records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl ProjectMetadata {
    /// Stamp both timestamps with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        let stamp = Utc::now();
        Self {
            name: name.into(),
            description: None,
            created: stamp,
            modified: stamp,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Record an edit. `created` is never moved.
    pub fn touch(&mut self) {
        self.modified = Utc::now().max(self.created);
    }
}
