//! Element data model: pixel rectangles, attribute snapshots, and the owned
//! descriptor form that is safe to hold after a handle is released.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Screen rectangle in device pixel coordinates.
///
/// The center is derived, never stored, but it is always present in the
/// serialized form so callers can aim gestures without doing the arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn center_x(&self) -> i32 {
        (self.left + self.right) / 2
    }

    pub fn center_y(&self) -> i32 {
        (self.top + self.bottom) / 2
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BoundingBox", 6)?;
        state.serialize_field("left", &self.left)?;
        state.serialize_field("top", &self.top)?;
        state.serialize_field("right", &self.right)?;
        state.serialize_field("bottom", &self.bottom)?;
        state.serialize_field("centerX", &self.center_x())?;
        state.serialize_field("centerY", &self.center_y())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Repr {
            left: i32,
            top: i32,
            right: i32,
            bottom: i32,
            // Centers are recomputed, incoming values are ignored.
            #[serde(default, rename = "centerX")]
            _center_x: i32,
            #[serde(default, rename = "centerY")]
            _center_y: i32,
        }

        let repr = Repr::deserialize(deserializer)?;
        Ok(Self::new(repr.left, repr.top, repr.right, repr.bottom))
    }
}

/// Read-only snapshot of one tree element's state at access time.
///
/// Text and description are plain strings; the platform's "no value" is the
/// empty string, never an option, so matching code compares uniformly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAttributes {
    pub class_name: String,
    pub text: String,
    pub description: String,
    pub resource_id: String,
    pub bounds: BoundingBox,
    pub clickable: bool,
    pub enabled: bool,
    pub focusable: bool,
    pub scrollable: bool,
    pub editable: bool,
    pub checkable: bool,
    pub checked: bool,
    pub focused: bool,
}

impl NodeAttributes {
    /// Whether a full-screen extraction keeps this node. Purely structural
    /// containers fail this and are dropped while their children are still
    /// visited.
    pub fn is_meaningful(&self) -> bool {
        !self.text.is_empty() || !self.description.is_empty() || self.clickable || self.editable
    }

    /// The element's user-facing label: its text, or its description when the
    /// text is empty.
    pub fn label(&self) -> &str {
        if self.text.is_empty() {
            &self.description
        } else {
            &self.text
        }
    }
}

/// Helper functions for clean serialization
fn is_empty_string(s: &String) -> bool {
    s.is_empty()
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Owned, serializable copy of a node's attributes.
///
/// This is what crosses the command boundary: it carries the same data as a
/// live handle's snapshot but stays valid after the handle is released and
/// performs no automation of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    #[serde(default, skip_serializing_if = "is_empty_string")]
    pub class_name: String,
    #[serde(default, skip_serializing_if = "is_empty_string")]
    pub text: String,
    #[serde(default, skip_serializing_if = "is_empty_string")]
    pub description: String,
    #[serde(default, skip_serializing_if = "is_empty_string")]
    pub resource_id: String,
    #[serde(default)]
    pub bounds: BoundingBox,
    #[serde(default, skip_serializing_if = "is_false")]
    pub clickable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub focusable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub scrollable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub editable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub checkable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub checked: bool,
}

impl From<&NodeAttributes> for ElementDescriptor {
    fn from(attrs: &NodeAttributes) -> Self {
        Self {
            class_name: attrs.class_name.clone(),
            text: attrs.text.clone(),
            description: attrs.description.clone(),
            resource_id: attrs.resource_id.clone(),
            bounds: attrs.bounds,
            clickable: attrs.clickable,
            enabled: attrs.enabled,
            focusable: attrs.focusable,
            scrollable: attrs.scrollable,
            editable: attrs.editable,
            checkable: attrs.checkable,
            checked: attrs.checked,
        }
    }
}

impl ElementDescriptor {
    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn display_label(&self) -> &str {
        if self.text.is_empty() {
            &self.description
        } else {
            &self.text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_serialize_with_derived_center() {
        let bounds = BoundingBox::new(10, 20, 110, 80);
        let json: serde_json::Value = serde_json::to_value(bounds).unwrap();
        assert_eq!(json["left"], 10);
        assert_eq!(json["top"], 20);
        assert_eq!(json["right"], 110);
        assert_eq!(json["bottom"], 80);
        assert_eq!(json["centerX"], 60);
        assert_eq!(json["centerY"], 50);
    }

    #[test]
    fn bounds_deserialize_recomputes_center() {
        // A stale centerX in the payload must not survive the round trip.
        let bounds: BoundingBox = serde_json::from_str(
            r#"{"left":0,"top":0,"right":100,"bottom":40,"centerX":999,"centerY":999}"#,
        )
        .unwrap();
        assert_eq!(bounds.center_x(), 50);
        assert_eq!(bounds.center_y(), 20);
    }

    #[test]
    fn descriptor_skips_empty_fields() {
        let attrs = NodeAttributes {
            text: "Send".into(),
            clickable: true,
            enabled: true,
            ..Default::default()
        };
        let descriptor = ElementDescriptor::from(&attrs);
        let json: serde_json::Value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["text"], "Send");
        assert_eq!(json["clickable"], true);
        assert!(json.get("description").is_none());
        assert!(json.get("resourceId").is_none());
        assert!(json.get("editable").is_none());
    }

    #[test]
    fn descriptor_json_round_trip() {
        let attrs = NodeAttributes {
            class_name: "android.widget.EditText".into(),
            text: "hello".into(),
            bounds: BoundingBox::new(0, 0, 50, 50),
            editable: true,
            enabled: true,
            focusable: true,
            ..Default::default()
        };
        let descriptor = ElementDescriptor::from(&attrs);
        let restored = ElementDescriptor::from_json(&descriptor.to_json().unwrap()).unwrap();
        assert_eq!(descriptor, restored);
    }

    #[test]
    fn meaningful_filter_keeps_labels_and_controls() {
        let label = NodeAttributes {
            text: "Status: idle".into(),
            ..Default::default()
        };
        let icon_button = NodeAttributes {
            description: "Open settings".into(),
            clickable: true,
            ..Default::default()
        };
        let wrapper = NodeAttributes {
            class_name: "android.widget.FrameLayout".into(),
            ..Default::default()
        };
        assert!(label.is_meaningful());
        assert!(icon_button.is_meaningful());
        assert!(!wrapper.is_meaningful());
    }
}
