pub mod prelude;

pub mod assignments;
pub mod assignments_feedback_categories;
pub mod class_enrollments;
pub mod classes;
pub mod departments;
pub mod feedback;
pub mod feedback_categories;
pub mod feedback_feedback_categories;
pub mod jwt;
pub mod roles;
pub mod submissions;
pub mod users;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = i32;
