//! Normalized property store for PropLens.
//!
//! This crate owns the authoritative in-memory mirror of the remote
//! object/property state. A hierarchical object → property model flattens
//! into one addressable map of live value cells; class-scoped properties
//! share a single cell across every object of their class, and
//! dynamic-reference values resolve one hop of indirection.
//!
//! # Architecture
//!
//! - The **key resolver** ([`key`], [`value`]) is pure: it computes the
//!   canonical [`StorageKey`] for an (object, property) pair under the
//!   scoping rules, and classifies raw values into the [`PropertyValue`]
//!   tagged union exactly once at the boundary.
//! - The **property store** ([`store`]) layers the stateful mutation/query
//!   API on top. Mutations take `&mut self`, queries `&self`: the
//!   single-writer/many-reader discipline of the UI event loop is enforced
//!   by the borrow checker, with no interior locking.
//! - Live cells are garbage collected by reference counting: a cell is
//!   evicted only when no currently-stored object resolves to its key.
//!
//! # Modules
//!
//! - [`error`] — [`StoreError`] and the crate [`Result`] alias
//! - [`key`] — [`StorageKey`] and scope resolution
//! - [`value`] — [`PropertyValue`] classification
//! - [`store`] — The [`PropertyStore`] itself

pub mod error;
pub mod key;
pub mod store;
pub mod value;

pub use error::{Result, StoreError};
pub use key::{resolve_scope, StorageKey};
pub use store::{ChangeObserver, LiveCell, PropertyStore};
pub use value::{classify, PropertyValue, RefKind};
