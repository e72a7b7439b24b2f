//! Core use-case services.
//!
//! # Responsibility
//! - Enforce ownership, authorship and tombstone rules for notes and comments.
//! - Keep storage, time and social-graph lookups behind injected capabilities.

pub mod clock;
pub mod note_service;
pub mod policy;
