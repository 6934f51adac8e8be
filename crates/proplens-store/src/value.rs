//! Classification of raw property values.
//!
//! A property value is either a literal or a dynamic reference: a descriptor
//! naming another property to read instead of holding its own value. The
//! distinction is structural and made exactly once, at ingestion; everything
//! downstream matches on the closed [`PropertyValue`] union instead of
//! re-inspecting JSON shapes.

use std::fmt;

use serde_json::Value;
use tracing::debug;

/// The kinds of dynamic reference a producer may send.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// Reference to a source property feeding this one.
    Source,
    /// Reference to an ordinary property.
    Property,
}

impl RefKind {
    /// Parse a wire `type` field. Unknown kinds return `None`.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "source" => Some(Self::Source),
            "property" => Some(Self::Property),
            _ => None,
        }
    }

    /// The wire spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Property => "property",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified property value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// A plain value, returned to the view as-is.
    Literal(Value),
    /// One hop of indirection: read the property named by `target` instead.
    Reference {
        /// Which kind of reference the descriptor declared.
        kind: RefKind,
        /// The property id to read.
        target: String,
    },
}

impl PropertyValue {
    /// Returns `true` for the reference variant.
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference { .. })
    }

    /// Returns `true` for the literal variant.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// The referenced property id, when this is a reference.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Reference { target, .. } => Some(target),
            Self::Literal(_) => None,
        }
    }
}

/// Classify a raw value as a literal or a dynamic reference.
///
/// A value qualifies as a reference only when it is a JSON object whose key
/// set is exactly `{"id", "type"}`, `type` is a recognized [`RefKind`], and
/// `id` is a string. Everything else is a literal: classification is total
/// and never fails. Note the deliberate absence of an escape hatch — a
/// legitimate literal of exactly this shape will classify as a reference,
/// which producers upstream rely on.
pub fn classify(value: &Value) -> PropertyValue {
    if let Value::Object(map) = value {
        if map.len() == 2 {
            if let (Some(Value::String(kind)), Some(id)) = (map.get("type"), map.get("id")) {
                match (RefKind::parse(kind), id) {
                    (Some(kind), Value::String(target)) => {
                        return PropertyValue::Reference {
                            kind,
                            target: target.clone(),
                        };
                    }
                    (Some(_), _) => {
                        debug!("reference-shaped value with non-string id treated as literal");
                    }
                    (None, _) => {
                        debug!(kind = %kind, "unknown reference kind treated as literal");
                    }
                }
            }
        }
    }
    PropertyValue::Literal(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_reference_classifies() {
        let classified = classify(&json!({ "type": "source", "id": "x" }));
        assert_eq!(
            classified,
            PropertyValue::Reference {
                kind: RefKind::Source,
                target: "x".to_string(),
            }
        );
    }

    #[test]
    fn property_reference_classifies() {
        let classified = classify(&json!({ "type": "property", "id": "other" }));
        assert!(classified.is_reference());
        assert_eq!(classified.target(), Some("other"));
    }

    #[test]
    fn unknown_kind_is_literal() {
        let raw = json!({ "type": "bogus", "id": "x" });
        assert_eq!(classify(&raw), PropertyValue::Literal(raw.clone()));
    }

    #[test]
    fn scalar_is_literal() {
        assert_eq!(classify(&json!(42)), PropertyValue::Literal(json!(42)));
    }

    #[test]
    fn extra_keys_disqualify() {
        let raw = json!({ "type": "source", "id": "x", "note": "hi" });
        assert!(classify(&raw).is_literal());
    }

    #[test]
    fn missing_id_disqualifies() {
        let raw = json!({ "type": "source" });
        assert!(classify(&raw).is_literal());
    }

    #[test]
    fn non_string_id_disqualifies() {
        let raw = json!({ "type": "source", "id": 7 });
        assert!(classify(&raw).is_literal());
    }

    #[test]
    fn non_string_type_disqualifies() {
        let raw = json!({ "type": 1, "id": "x" });
        assert!(classify(&raw).is_literal());
    }

    #[test]
    fn array_is_literal() {
        let raw = json!(["type", "id"]);
        assert!(classify(&raw).is_literal());
    }

    #[test]
    fn ref_kind_wire_spelling_round_trips() {
        for kind in [RefKind::Source, RefKind::Property] {
            assert_eq!(RefKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RefKind::parse("SOURCE"), None);
    }
}
