//! Core use-case services.
//!
//! # Responsibility
//! - Expose request-level operations on top of the repositories.
//! - Keep outer surfaces (CLI, transport) decoupled from SQL details.

pub mod tracker_service;
