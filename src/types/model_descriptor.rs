use std::fmt;

use serde::{Deserialize, Serialize};

/// A model the backend can serve.
///
/// The catalog endpoint sends `id` (required) and optionally `name`; when
/// `name` is absent the id doubles as the display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ModelEntry", into = "ModelEntry")]
pub struct ModelDescriptor {
    /// Unique model identifier, sent to the backend on chat requests.
    pub id: String,

    /// Human-readable name, for presentation only.
    pub display_name: String,
}

impl ModelDescriptor {
    /// Create a new `ModelDescriptor`.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.display_name == self.id {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.display_name, self.id)
        }
    }
}

/// Wire shape of a catalog entry.
#[derive(Clone, Serialize, Deserialize)]
struct ModelEntry {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<ModelEntry> for ModelDescriptor {
    fn from(entry: ModelEntry) -> Self {
        let display_name = entry.name.unwrap_or_else(|| entry.id.clone());
        Self {
            id: entry.id,
            display_name,
        }
    }
}

impl From<ModelDescriptor> for ModelEntry {
    fn from(descriptor: ModelDescriptor) -> Self {
        let name = if descriptor.display_name == descriptor.id {
            None
        } else {
            Some(descriptor.display_name)
        };
        Self {
            id: descriptor.id,
            name,
        }
    }
}
