//! Domain logic for the tender application portal.
//!
//! Everything here is pure (no database, no HTTP) so the state machines and
//! validation rules can be exercised directly from unit tests.

pub mod answer;
pub mod error;
pub mod feedback;
pub mod form;
pub mod question;
pub mod reorder;
pub mod response_view;
pub mod roles;
pub mod tender;
pub mod types;
