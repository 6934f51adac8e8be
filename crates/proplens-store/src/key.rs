//! Canonical storage keys and scope resolution.
//!
//! Every live property value is addressed by a [`StorageKey`] derived from
//! the owning object and the property definition. Scope resolution is what
//! gives class-scoped properties a shared identity: two objects of the same
//! class resolve their class-scoped properties to the same key, and
//! therefore to the same live cell.

use std::fmt;

use proplens_types::{ObjectSnapshot, PropertyDef};

/// Canonical identity of one live property value.
///
/// Kept as a structured `(scope_id, property_id)` pair rather than a joined
/// string: distinct pairs never collide regardless of what characters the
/// identifiers contain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey {
    scope_id: String,
    property_id: String,
}

impl StorageKey {
    /// Create a key from an already-resolved scope and a property id.
    pub fn new(scope_id: impl Into<String>, property_id: impl Into<String>) -> Self {
        Self {
            scope_id: scope_id.into(),
            property_id: property_id.into(),
        }
    }

    /// Resolve the key for `prop` as defined on `snapshot`.
    pub fn for_property(snapshot: &ObjectSnapshot, prop: &PropertyDef) -> Self {
        Self::new(resolve_scope(snapshot, prop), &prop.id)
    }

    /// The scope half of the key (a class id or an object id).
    pub fn scope_id(&self) -> &str {
        &self.scope_id
    }

    /// The property half of the key.
    pub fn property_id(&self) -> &str {
        &self.property_id
    }
}

impl fmt::Display for StorageKey {
    /// Log-friendly rendering. Only the structured pair is used for lookup.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope_id, self.property_id)
    }
}

/// Resolve the scope identifier for `prop` as defined on `snapshot`.
///
/// Returns the object's class id when the property is class-scoped and the
/// object declares a class; the object's own id otherwise. A class-scoped
/// property on a classless object falls back to instance scope.
pub fn resolve_scope<'a>(snapshot: &'a ObjectSnapshot, prop: &'a PropertyDef) -> &'a str {
    if prop.class_scope {
        if let Some(class_id) = &snapshot.class_id {
            return class_id;
        }
    }
    &snapshot.object_id
}
