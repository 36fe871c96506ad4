//! Typed request inputs, one module per resource.
//!
//! Query strings deserialize into `IndexParams` structs and flow into the
//! persistence layer as a `QueryFilterMap`; PATCH bodies deserialize into
//! `UpdateParams` structs and flow down as an `UpdateMap`. Handlers never
//! see raw maps or untyped JSON.

pub(crate) mod assignment;
pub(crate) mod feedback;
pub(crate) mod patch;
pub(crate) mod submission;
pub(crate) mod user;
