//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod feedback_repo;
pub mod question_repo;
pub mod response_repo;
pub mod role_assignment_repo;
pub mod tender_repo;

pub use feedback_repo::FeedbackRepo;
pub use question_repo::QuestionRepo;
pub use response_repo::ResponseRepo;
pub use role_assignment_repo::RoleAssignmentRepo;
pub use tender_repo::TenderRepo;
