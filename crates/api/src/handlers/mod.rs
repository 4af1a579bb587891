pub mod feedback;
pub mod me;
pub mod questions;
pub mod responses;
pub mod roles;
pub mod tenders;
