//! Skeleton definition and reconstruction for hierarchical rigs.
//!
//! A skeleton is an ordered list of joints, each holding transform
//! attributes and weak name references to its parent and children.
//! Joints can be captured from a live authoring host through the
//! [`host::Host`] capability trait, persisted as JSON documents
//! (see the `rig-document` crate) and rebuilt later, possibly in a
//! different process or host session. Every host-facing operation
//! takes an explicit [`host::Environment`] so the same code path
//! serves both the host-bound and the purely in-memory backend.

pub mod batch;
pub mod error;
pub mod export;
pub mod host;
pub mod joint;
pub mod skeleton;
pub mod transform;
