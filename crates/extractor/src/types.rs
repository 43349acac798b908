use serde::{Deserialize, Serialize};

/// Documentation for one event method
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventRecord {
    /// Method name
    pub name: String,

    /// Resolved event id (empty when not declared or unresolvable)
    pub id: String,

    /// Resolved event level (configured default when not declared)
    pub level: String,

    /// `summary` section of the documentation comment
    pub description: String,

    /// `resolution` section of the documentation comment
    pub resolution: String,

    /// Remaining `[Event(...)]` arguments
    #[serde(default)]
    pub tags: EventTags,
}

impl EventRecord {
    /// Create a record without tags
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        level: impl Into<String>,
        description: impl Into<String>,
        resolution: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            level: level.into(),
            description: description.into(),
            resolution: resolution.into(),
            tags: EventTags::default(),
        }
    }

    /// Builder: set tags
    #[must_use]
    pub fn with_tags(mut self, tags: EventTags) -> Self {
        self.tags = tags;
        self
    }
}

/// Optional event metadata; `None` when the argument is absent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventTags {
    pub keywords: Option<String>,
    pub task: Option<String>,
    pub opcode: Option<String>,
    pub channel: Option<String>,
    pub message: Option<String>,
    pub version: Option<String>,
}

impl EventTags {
    /// `[Event(...)]` argument names stored as tags
    pub const ARGUMENTS: [&'static str; 6] =
        ["Keywords", "Task", "Opcode", "Channel", "Message", "Version"];

    /// Store a resolved value under its attribute argument name
    pub fn set(&mut self, argument: &str, value: String) {
        let slot = match argument {
            "Keywords" => &mut self.keywords,
            "Task" => &mut self.task,
            "Opcode" => &mut self.opcode,
            "Channel" => &mut self.channel,
            "Message" => &mut self.message,
            "Version" => &mut self.version,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Whether no tag is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Everything extracted from one event source class
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventSourceDocument {
    /// Resolved `Name` of the class-level event source attribute
    pub name: String,

    /// Class identifier
    pub class_name: String,

    /// One record per event method, in declaration order
    pub records: Vec<EventRecord>,
}

impl EventSourceDocument {
    /// Stem for output files: the event source name, or the class name when
    /// the name resolved to nothing
    #[must_use]
    pub fn file_stem(&self) -> &str {
        if self.name.is_empty() {
            &self.class_name
        } else {
            &self.name
        }
    }
}
