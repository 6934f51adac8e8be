//! Incremental change notifications.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A discrete property value change delivered by the transport.
///
/// `event_source` names the actor that produced the change. The view layer
/// compares it against its own actor id to avoid echoing a value the local
/// user just typed back into the same widget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    /// Target object.
    pub object_id: String,

    /// Target property within that object's current definition list.
    pub property_id: String,

    /// The new value (literal or dynamic-reference descriptor).
    pub value: Value,

    /// Actor that produced this change, `None` when unknown.
    #[serde(default)]
    pub event_source: Option<String>,
}

impl ChangeEvent {
    /// Create a change event with no provenance.
    pub fn new(
        object_id: impl Into<String>,
        property_id: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            property_id: property_id.into(),
            value,
            event_source: None,
        }
    }

    /// Create a change event attributed to `actor`.
    pub fn from_actor(
        object_id: impl Into<String>,
        property_id: impl Into<String>,
        value: Value,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            event_source: Some(actor.into()),
            ..Self::new(object_id, property_id, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_shape_round_trips() {
        let raw = json!({
            "objectId": "dev1",
            "propertyId": "brightness",
            "value": 80,
            "eventSource": "remote"
        });
        let event: ChangeEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.object_id, "dev1");
        assert_eq!(event.property_id, "brightness");
        assert_eq!(event.value, json!(80));
        assert_eq!(event.event_source.as_deref(), Some("remote"));

        let back = serde_json::to_value(&event).unwrap();
        let reparsed: ChangeEvent = serde_json::from_value(back).unwrap();
        assert_eq!(reparsed, event);
    }

    #[test]
    fn missing_event_source_parses_as_none() {
        let raw = json!({ "objectId": "o", "propertyId": "p", "value": null });
        let event: ChangeEvent = serde_json::from_value(raw).unwrap();
        assert!(event.event_source.is_none());
    }

    #[test]
    fn null_event_source_parses_as_none() {
        let raw = json!({
            "objectId": "o",
            "propertyId": "p",
            "value": 1,
            "eventSource": null
        });
        let event: ChangeEvent = serde_json::from_value(raw).unwrap();
        assert!(event.event_source.is_none());
    }
}
