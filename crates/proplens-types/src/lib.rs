//! Foundation types for PropLens.
//!
//! PropLens mirrors the object/property state of a remote process so an
//! inspection UI can render and edit it live. This crate holds the types that
//! cross the transport boundary, plus the select-data normalizer the view
//! layer uses for choice widgets. Every other PropLens crate depends on
//! `proplens-types`.
//!
//! # Key Types
//!
//! - [`ObjectSnapshot`] — Full definition of one remote object and its
//!   property list
//! - [`PropertyDef`] — One property: id, scoping, value, and pass-through
//!   presentation metadata
//! - [`ChangeEvent`] — Incremental value update with actor provenance
//! - [`SelectOption`] — Normalized label/value pair for choice widgets

pub mod event;
pub mod select;
pub mod snapshot;

pub use event::ChangeEvent;
pub use select::{parse_select_options, SelectOption};
pub use snapshot::{ObjectSnapshot, PropertyDef};
