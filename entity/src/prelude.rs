pub use super::assignments::Entity as Assignments;
pub use super::assignments_feedback_categories::Entity as AssignmentsFeedbackCategories;
pub use super::class_enrollments::Entity as ClassEnrollments;
pub use super::classes::Entity as Classes;
pub use super::departments::Entity as Departments;
pub use super::feedback::Entity as Feedback;
pub use super::feedback_categories::Entity as FeedbackCategories;
pub use super::feedback_feedback_categories::Entity as FeedbackFeedbackCategories;
pub use super::submissions::Entity as Submissions;
pub use super::users::Entity as Users;
