//! The stateful normalized property store.
//!
//! [`PropertyStore`] owns the authoritative mirror of the remote state: the
//! per-object property definition lists and the flat map of live value
//! cells. Mutations take `&mut self` and queries `&self`, so the UI event
//! loop's single-writer discipline is enforced by the borrow checker rather
//! than by locks.

use std::collections::HashMap;

use proplens_types::{ChangeEvent, ObjectSnapshot, PropertyDef};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::key::StorageKey;
use crate::value::{classify, PropertyValue};

/// Current value and last-writer provenance for one storage key.
///
/// `event_source` is `None` for values established from a snapshot and names
/// the producing actor for values established by a change event. The view
/// layer reads it to suppress echoing a value the local user just produced.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveCell {
    /// The current raw value (literal or dynamic-reference descriptor).
    pub value: Value,
    /// Actor that produced the most recent write, `None` for snapshots.
    pub event_source: Option<String>,
}

impl LiveCell {
    fn from_snapshot(value: Value) -> Self {
        Self {
            value,
            event_source: None,
        }
    }

    fn from_event(value: Value, event_source: Option<String>) -> Self {
        Self {
            value,
            event_source,
        }
    }
}

/// Observer notified after a change event commits.
///
/// Observers are handed to the store at construction; there is no ambient
/// event bus. Snapshot ingestion notifies nobody — the surrounding view
/// layer re-renders on its own schedule.
pub trait ChangeObserver {
    /// Called after `event` has been written into the store.
    fn property_changed(&self, event: &ChangeEvent);
}

/// The normalized property store.
///
/// Flattens the object → property hierarchy into one map keyed by
/// [`StorageKey`], so class-scoped properties of same-class objects share a
/// single live cell. Cells are garbage collected by reference counting: a
/// cell survives as long as any currently-stored object resolves to its key.
pub struct PropertyStore {
    /// Current snapshot per object id.
    objects: HashMap<String, ObjectSnapshot>,
    /// Live value cells, the flat authoritative map.
    live: HashMap<StorageKey, LiveCell>,
    /// How many (object, property) pairs currently resolve to each key.
    bindings: HashMap<StorageKey, usize>,
    /// Routing-adjacent: the object the detail view is showing.
    selected: Option<String>,
    observers: Vec<Box<dyn ChangeObserver>>,
}

impl PropertyStore {
    /// Create an empty store with no observers.
    pub fn new() -> Self {
        Self::with_observers(Vec::new())
    }

    /// Create an empty store that notifies `observers` on every applied
    /// change event.
    pub fn with_observers(observers: Vec<Box<dyn ChangeObserver>>) -> Self {
        Self {
            objects: HashMap::new(),
            live: HashMap::new(),
            bindings: HashMap::new(),
            selected: None,
            observers,
        }
    }

    // -----------------------------------------------------------------------
    // Ingestion
    // -----------------------------------------------------------------------

    /// Ingest a full object snapshot, wholesale superseding any previous
    /// definition list for its object id.
    ///
    /// Every property in the new list gets a live cell with snapshot
    /// provenance (`event_source: None`), overwriting whatever was there —
    /// including a class-shared cell last written through another object.
    /// Cells bound only by the superseded list are evicted; cells still
    /// referenced by other objects (class scope) survive.
    pub fn replace_object(&mut self, snapshot: ObjectSnapshot) -> Result<()> {
        if snapshot.object_id.is_empty() {
            return Err(StoreError::EmptyObjectId);
        }
        let snapshot = normalize_properties(snapshot);

        // Unbind the superseded list first; eviction waits until the new
        // list has claimed its keys, so a key present in both never loses
        // its cell in between.
        let mut orphaned = Vec::new();
        if let Some(old) = self.objects.remove(&snapshot.object_id) {
            for prop in &old.properties {
                let key = StorageKey::for_property(&old, prop);
                if self.unbind(&key) {
                    orphaned.push(key);
                }
            }
        }

        for prop in &snapshot.properties {
            let key = StorageKey::for_property(&snapshot, prop);
            orphaned.retain(|k| k != &key);
            *self.bindings.entry(key.clone()).or_insert(0) += 1;
            self.live
                .insert(key, LiveCell::from_snapshot(prop.value.clone()));
        }

        for key in orphaned {
            self.live.remove(&key);
        }

        debug!(
            object = %snapshot.object_id,
            properties = snapshot.properties.len(),
            "object snapshot replaced"
        );
        self.objects.insert(snapshot.object_id.clone(), snapshot);
        Ok(())
    }

    /// Apply an incremental change event.
    ///
    /// Scope is resolved through the *current* definition of the target
    /// property; the cell is overwritten with the event's value and actor.
    /// This is the only operation that writes a non-`None` event source.
    /// Registered observers are notified after the write commits.
    pub fn apply_change(&mut self, event: ChangeEvent) -> Result<()> {
        let key = self
            .resolved_key(&event.object_id, &event.property_id)
            .ok_or_else(|| StoreError::UnknownProperty {
                object_id: event.object_id.clone(),
                property_id: event.property_id.clone(),
            })?;

        self.live.insert(
            key,
            LiveCell::from_event(event.value.clone(), event.event_source.clone()),
        );
        debug!(
            object = %event.object_id,
            property = %event.property_id,
            source = ?event.event_source,
            "change event applied"
        );

        for observer in &self.observers {
            observer.property_changed(&event);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The current definition of a property, if the object and property are
    /// known.
    pub fn property_def(&self, object_id: &str, property_id: &str) -> Option<&PropertyDef> {
        self.objects.get(object_id)?.property(property_id)
    }

    /// The current raw value at a property's resolved key.
    pub fn value(&self, object_id: &str, property_id: &str) -> Option<&Value> {
        Some(&self.change_meta(object_id, property_id)?.value)
    }

    /// The full live cell, including provenance, at a property's resolved
    /// key.
    pub fn change_meta(&self, object_id: &str, property_id: &str) -> Option<&LiveCell> {
        let key = self.resolved_key(object_id, property_id)?;
        let cell = self.live.get(&key);
        if cell.is_none() {
            // A definition without a cell means the store invariant broke.
            // Degrade to "no data" instead of faulting the view layer.
            warn!(object = %object_id, property = %property_id, "live cell missing for defined property");
        }
        cell
    }

    /// Resolve one hop of dynamic-value indirection.
    ///
    /// Literals come back unchanged. A reference reads the current value of
    /// its target property on the same object — exactly one hop: a target
    /// whose own value is another reference comes back as that descriptor,
    /// never chased further.
    pub fn resolve_dynamic(&self, object_id: &str, value: &Value) -> Option<Value> {
        match classify(value) {
            PropertyValue::Literal(literal) => Some(literal),
            PropertyValue::Reference { target, .. } => {
                self.value(object_id, &target).cloned()
            }
        }
    }

    /// The current snapshot for an object, if known.
    pub fn snapshot(&self, object_id: &str) -> Option<&ObjectSnapshot> {
        self.objects.get(object_id)
    }

    /// Sorted ids of all currently known objects, for the list view.
    pub fn object_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.objects.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` when no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of live value cells currently held.
    pub fn cell_count(&self) -> usize {
        self.live.len()
    }

    // -----------------------------------------------------------------------
    // Selection (routing-adjacent)
    // -----------------------------------------------------------------------

    /// The object the detail view is currently showing, if any.
    pub fn selected_object_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Set or clear the selected object.
    pub fn set_selected_object(&mut self, object_id: Option<String>) {
        self.selected = object_id;
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Compute the storage key for a property through its current
    /// definition.
    fn resolved_key(&self, object_id: &str, property_id: &str) -> Option<StorageKey> {
        let snapshot = self.objects.get(object_id)?;
        let prop = snapshot.property(property_id)?;
        Some(StorageKey::for_property(snapshot, prop))
    }

    /// Decrement the binding count for `key`. Returns `true` when the count
    /// reached zero and the key is no longer referenced by any object.
    fn unbind(&mut self, key: &StorageKey) -> bool {
        match self.bindings.get_mut(key) {
            Some(count) if *count > 1 => {
                *count -= 1;
                false
            }
            Some(_) => {
                self.bindings.remove(key);
                true
            }
            None => {
                warn!(key = %key, "binding count missing for bound key");
                false
            }
        }
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PropertyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyStore")
            .field("object_count", &self.objects.len())
            .field("cell_count", &self.live.len())
            .field("selected", &self.selected)
            .finish()
    }
}

/// Collapse duplicate property ids within one snapshot: the last definition
/// wins, keeping the position of the first occurrence.
fn normalize_properties(mut snapshot: ObjectSnapshot) -> ObjectSnapshot {
    let mut slot_by_id: HashMap<String, usize> = HashMap::with_capacity(snapshot.properties.len());
    let mut props: Vec<PropertyDef> = Vec::with_capacity(snapshot.properties.len());
    for prop in snapshot.properties.drain(..) {
        match slot_by_id.get(&prop.id) {
            Some(&slot) => props[slot] = prop,
            None => {
                slot_by_id.insert(prop.id.clone(), props.len());
                props.push(prop);
            }
        }
    }
    snapshot.properties = props;
    snapshot
}
