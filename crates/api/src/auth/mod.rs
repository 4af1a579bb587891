//! Identity tokens.
//!
//! - [`jwt`] -- verification of bearer tokens issued by the external
//!   authentication provider.

pub mod jwt;
