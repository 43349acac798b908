use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// Names recognised by the extractor.
///
/// Every field has a conventional default, so a partial TOML/JSON document
/// only needs to list the names it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Base type that marks a class as an event source
    pub marker_type: String,

    /// Class-level attribute carrying the event source display name
    pub source_attribute: String,

    /// Method-level attribute marking an event method
    pub event_attribute: String,

    /// Named argument of `source_attribute` holding the display name
    pub name_argument: String,

    /// Named argument holding the event id (a positional argument also counts)
    pub id_argument: String,

    /// Named argument holding the event level
    pub level_argument: String,

    /// Level reported when an event does not declare one
    pub default_level: String,

    /// Documentation element used for the description
    pub summary_section: String,

    /// Documentation element used for the resolution
    pub resolution_section: String,

    /// Separator used when rejoining documentation lines
    pub line_separator: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            marker_type: "EventSource".to_string(),
            source_attribute: "EventSource".to_string(),
            event_attribute: "Event".to_string(),
            name_argument: "Name".to_string(),
            id_argument: "Id".to_string(),
            level_argument: "Level".to_string(),
            default_level: "Informational".to_string(),
            summary_section: "summary".to_string(),
            resolution_section: "resolution".to_string(),
            line_separator: "\n".to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("marker_type", &self.marker_type),
            ("source_attribute", &self.source_attribute),
            ("event_attribute", &self.event_attribute),
            ("name_argument", &self.name_argument),
            ("id_argument", &self.id_argument),
            ("level_argument", &self.level_argument),
            ("summary_section", &self.summary_section),
            ("resolution_section", &self.resolution_section),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ExtractError::invalid_config(format!("{key} must not be empty")));
            }
        }

        if self.summary_section == self.resolution_section {
            return Err(ExtractError::invalid_config(format!(
                "summary_section and resolution_section are both '{}'",
                self.summary_section
            )));
        }

        Ok(())
    }
}
