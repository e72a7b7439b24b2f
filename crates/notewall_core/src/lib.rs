//! Core domain logic for Notewall notes and comment threads.
//! This crate is the single source of truth for access-control invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod social;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::comment::{Comment, CommentDraft, CommentId};
pub use model::note::{CommentPrivacy, Note, NoteDraft, NoteId, NoteView, UserId};
pub use repo::note_repo::{InMemoryNoteRepository, NoteRepository, RepoError, RepoResult};
pub use service::clock::{Clock, SystemClock};
pub use service::note_service::{
    ErrorKind, NoteListQuery, NoteService, NoteServiceError, NoteSort, ServiceResult,
    COMMENT_EDITED, MIN_COMMENT_MESSAGE_CHARS,
};
pub use social::graph::{AdjacentIdGraph, RelationshipGraph, StaticRelationshipGraph};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
