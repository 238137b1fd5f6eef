//! The fixed command surface.
//!
//! One closed enum, one typed parameter set per variant, checked
//! exhaustively at dispatch. The wire shape is internally tagged
//! (`"command"`) with camelCase fields, so external callers submit e.g.
//! `{"command":"findElementByText","text":"Send","exact":true}`.

use marionette::{AutomationError, ScrollDirection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    IsAvailable,
    GetScreenContent,
    #[serde(rename_all = "camelCase")]
    FindElementByText {
        text: String,
        #[serde(default)]
        exact: bool,
    },
    #[serde(rename_all = "camelCase")]
    ClickOnText { text: String },
    #[serde(rename_all = "camelCase")]
    ClickAt { x: i32, y: i32 },
    #[serde(rename_all = "camelCase")]
    TypeText { text: String },
    #[serde(rename_all = "camelCase")]
    Scroll { direction: ScrollDirection },
    #[serde(rename_all = "camelCase")]
    Swipe {
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        #[serde(default)]
        duration_ms: Option<u64>,
    },
    PressBack,
    PressHome,
    GetCurrentPackage,
    ExtractAllText,
    #[serde(rename_all = "camelCase")]
    WaitForElement {
        text: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },
}

impl Command {
    /// Parse a command from its wire form. Malformed input is an
    /// `InvalidArgument`, the same failure callers get for bad parameter
    /// values.
    pub fn from_json(json: &str) -> Result<Self, AutomationError> {
        serde_json::from_str(json).map_err(|e| AutomationError::InvalidArgument(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_wire_form() {
        let command =
            Command::from_json(r#"{"command":"findElementByText","text":"Send","exact":true}"#)
                .unwrap();
        assert_eq!(
            command,
            Command::FindElementByText {
                text: "Send".into(),
                exact: true,
            }
        );
    }

    #[test]
    fn optional_fields_default() {
        let command = Command::from_json(r#"{"command":"waitForElement","text":"Done"}"#).unwrap();
        assert_eq!(
            command,
            Command::WaitForElement {
                text: "Done".into(),
                timeout_ms: None,
            }
        );

        let command = Command::from_json(r#"{"command":"findElementByText","text":"x"}"#).unwrap();
        assert!(matches!(
            command,
            Command::FindElementByText { exact: false, .. }
        ));
    }

    #[test]
    fn unit_commands_round_trip() {
        for command in [Command::IsAvailable, Command::PressBack, Command::PressHome] {
            let json = serde_json::to_string(&command).unwrap();
            assert_eq!(Command::from_json(&json).unwrap(), command);
        }
        assert_eq!(
            serde_json::to_string(&Command::PressBack).unwrap(),
            r#"{"command":"pressBack"}"#
        );
    }

    #[test]
    fn scroll_direction_uses_lowercase_names() {
        let command = Command::from_json(r#"{"command":"scroll","direction":"down"}"#).unwrap();
        assert_eq!(
            command,
            Command::Scroll {
                direction: ScrollDirection::Down
            }
        );
    }

    #[test]
    fn camel_case_swipe_fields() {
        let command = Command::from_json(
            r#"{"command":"swipe","startX":1,"startY":2,"endX":3,"endY":4,"durationMs":250}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            Command::Swipe {
                start_x: 1,
                start_y: 2,
                end_x: 3,
                end_y: 4,
                duration_ms: Some(250),
            }
        );
    }

    #[test]
    fn unknown_command_is_invalid_argument() {
        let err = Command::from_json(r#"{"command":"selfDestruct"}"#).unwrap_err();
        assert!(matches!(err, AutomationError::InvalidArgument(_)));
    }
}
