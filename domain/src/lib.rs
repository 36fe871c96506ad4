//! Business logic over the persistence layer.
//!
//! `web` depends on this crate alone; the items below are re-exported from
//! `entity_api` so handlers can build filter and update maps without taking
//! a direct dependency on the persistence crate.
pub use entity_api::{
    mutate::{IntoUpdateMap, UpdateMap},
    IntoQueryFilterMap, QueryFilterMap,
};

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{
    assignments, class_enrollments, classes, departments, feedback_categories, roles, submissions,
    users, Id,
};

pub mod assignment;
pub mod auth;
pub mod class;
pub mod error;
pub mod feedback;
pub mod feedback_category;
pub mod jwt;
pub mod submission;
