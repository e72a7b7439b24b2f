//! Domain model for notes and their comment threads.
//!
//! # Responsibility
//! - Define the canonical records shared by service and repository layers.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - Every record is identified by a numeric id that is never reused.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod comment;
pub mod note;
