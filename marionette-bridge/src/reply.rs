//! Typed command results. Negative outcomes ("nothing found", "platform
//! refused") are ordinary replies carrying `false`, never errors.

use marionette::{BoundingBox, ElementDescriptor};
use serde::{Deserialize, Serialize};

/// Snapshot of the foreground screen's meaningful elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenContent {
    pub package: String,
    pub elements: Vec<ElementDescriptor>,
    /// Milliseconds since the Unix epoch, taken when the snapshot finished.
    pub timestamp: u64,
}

/// Result of a single-element lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementQueryReply {
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
}

impl ElementQueryReply {
    pub fn not_found() -> Self {
        Self {
            found: false,
            text: None,
            bounds: None,
        }
    }

    pub fn found(text: String, bounds: BoundingBox) -> Self {
        Self {
            found: true,
            text: Some(text),
            bounds: Some(bounds),
        }
    }
}

/// Successful command payloads. Serializes untagged: booleans, strings and
/// lists go over the wire as themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandReply {
    /// Boolean outcome: availability checks and every action command.
    Acknowledged(bool),
    Package(String),
    Texts(Vec<String>),
    Element(ElementQueryReply),
    Screen(ScreenContent),
}

impl CommandReply {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Acknowledged(value) => Some(*value),
            _ => None,
        }
    }
}
