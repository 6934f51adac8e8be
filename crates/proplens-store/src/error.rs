//! Error types for property store mutations.

use thiserror::Error;

/// Errors that can occur while ingesting snapshots or change events.
///
/// Queries never produce errors: a missing object, definition, or cell is a
/// routine "no data yet" state and comes back as `None`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A snapshot arrived without an object id.
    #[error("object snapshot has an empty object id")]
    EmptyObjectId,

    /// A change event targeted an object or property the store does not
    /// currently know. Usually a stale event racing a snapshot replacement.
    #[error("unknown property: {object_id}/{property_id}")]
    UnknownProperty {
        object_id: String,
        property_id: String,
    },
}

/// Convenience type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
