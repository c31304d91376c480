//! Persisted document format for rig skeleton definitions.
//!
//! This library only holds the serde types written to and read from
//! disk. Field names carry the underscore prefix of the historical
//! format, every field has a default so partial documents decode, and
//! unrecognized keys are collected instead of rejected so newer
//! documents stay readable. Live host bindings are never part of a
//! document: the `_node` key is always written as `null`.

pub mod joint;
pub mod skeleton;
