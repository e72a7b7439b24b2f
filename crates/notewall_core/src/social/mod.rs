//! Social relationship capabilities.
//!
//! The core never models the social graph itself; it only asks the
//! injected `RelationshipGraph` whether two users are related.

pub mod graph;
