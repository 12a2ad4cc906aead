//! Tracker domain model.
//!
//! # Responsibility
//! - Define the persisted row shapes for owners, projects and comments.
//! - Define the nested read views returned to callers.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID.
//! - View field names are a stable serialization contract.

pub mod comment;
pub mod owner;
pub mod project;
