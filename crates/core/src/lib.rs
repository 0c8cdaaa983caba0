//! Domain types and workflow rules shared by the database and API layers.
//!
//! Nothing in this crate performs I/O. Rules that must hold regardless of the
//! storage backend (enrollment transitions, grade computation, allotment
//! eligibility) live here so every repository implementation applies them the
//! same way.

pub mod errors;
pub mod models;
