//! Object snapshots and property definitions as delivered by the transport.
//!
//! A snapshot is the wholesale definition of one remote object. The remote
//! side never patches an object in place: a fresh snapshot for an `objectId`
//! fully supersedes the previous property list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full definition of one addressable remote object.
///
/// `class_id` identifies a shared schema: properties flagged with
/// [`PropertyDef::class_scope`] on objects carrying the same `class_id`
/// resolve to a single shared live value rather than per-object copies.
///
/// Fields beyond the known ones (display name, doc text, UI version) are
/// producer-defined presentation metadata and flatten through `meta`
/// untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSnapshot {
    /// Unique object identifier.
    pub object_id: String,

    /// Shared schema/class identifier, when the object belongs to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,

    /// Ordered property definitions.
    #[serde(default)]
    pub properties: Vec<PropertyDef>,

    /// Opaque object-level presentation metadata.
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl ObjectSnapshot {
    /// Create a snapshot with no class and no properties.
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            class_id: None,
            properties: Vec::new(),
            meta: Map::new(),
        }
    }

    /// Create a snapshot belonging to a shared class.
    pub fn with_class(object_id: impl Into<String>, class_id: impl Into<String>) -> Self {
        Self {
            class_id: Some(class_id.into()),
            ..Self::new(object_id)
        }
    }

    /// Append a property definition, builder style.
    pub fn property_def(mut self, prop: PropertyDef) -> Self {
        self.properties.push(prop);
        self
    }

    /// Look up a property definition by id.
    pub fn property(&self, property_id: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.id == property_id)
    }
}

/// One property inside an object snapshot.
///
/// `value` is either a literal or a dynamic-reference descriptor; telling the
/// two apart is the store's job, not serde's. Everything the producer sends
/// beyond the known fields (widget hints, min/max/step, select data,
/// read-only flag, hierarchy) flattens through `meta` unmodified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    /// Property identifier, unique within one object's list.
    pub id: String,

    /// Shared across all objects of the owning object's class when `true`.
    #[serde(default)]
    pub class_scope: bool,

    /// Literal value or dynamic-reference descriptor.
    pub value: Value,

    /// Opaque presentation metadata.
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl PropertyDef {
    /// Create an instance-scoped property.
    pub fn new(id: impl Into<String>, value: Value) -> Self {
        Self {
            id: id.into(),
            class_scope: false,
            value,
            meta: Map::new(),
        }
    }

    /// Create a class-scoped property.
    pub fn class_scoped(id: impl Into<String>, value: Value) -> Self {
        Self {
            class_scope: true,
            ..Self::new(id, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_wire_shape_round_trips() {
        let raw = json!({
            "objectId": "dev1",
            "classId": "Widget",
            "name": "Device One",
            "properties": [
                { "id": "brightness", "classScope": true, "value": 50 },
                { "id": "label", "value": "hello", "valueType": "string" }
            ]
        });

        let snapshot: ObjectSnapshot = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(snapshot.object_id, "dev1");
        assert_eq!(snapshot.class_id.as_deref(), Some("Widget"));
        assert_eq!(snapshot.properties.len(), 2);
        assert_eq!(snapshot.meta.get("name"), Some(&json!("Device One")));

        let back = serde_json::to_value(&snapshot).unwrap();
        let reparsed: ObjectSnapshot = serde_json::from_value(back).unwrap();
        assert_eq!(reparsed, snapshot);
    }

    #[test]
    fn class_scope_defaults_to_false() {
        let raw = json!({ "id": "volume", "value": 10 });
        let prop: PropertyDef = serde_json::from_value(raw).unwrap();
        assert!(!prop.class_scope);
    }

    #[test]
    fn class_id_is_optional() {
        let raw = json!({ "objectId": "solo", "properties": [] });
        let snapshot: ObjectSnapshot = serde_json::from_value(raw).unwrap();
        assert!(snapshot.class_id.is_none());
    }

    #[test]
    fn presentation_metadata_passes_through() {
        let raw = json!({
            "id": "mode",
            "value": "auto",
            "selectData": ["auto", "manual"],
            "displayName": "Mode",
            "readOnly": false
        });
        let prop: PropertyDef = serde_json::from_value(raw).unwrap();
        assert_eq!(prop.meta.get("selectData"), Some(&json!(["auto", "manual"])));
        assert_eq!(prop.meta.get("displayName"), Some(&json!("Mode")));
        assert_eq!(prop.meta.get("readOnly"), Some(&json!(false)));
    }

    #[test]
    fn property_lookup() {
        let snapshot = ObjectSnapshot::new("dev1")
            .property_def(PropertyDef::new("a", json!(1)))
            .property_def(PropertyDef::new("b", json!(2)));
        assert_eq!(snapshot.property("b").map(|p| &p.value), Some(&json!(2)));
        assert!(snapshot.property("c").is_none());
    }
}
