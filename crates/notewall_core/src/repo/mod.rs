//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define the storage contract the note service depends on.
//! - Keep id allocation and table layout out of business rules.
//!
//! # Invariants
//! - Repository APIs return semantic not-found errors for unknown rows.
//! - Repositories never apply access-control rules.

pub mod note_repo;
