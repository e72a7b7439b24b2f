//! Note/comment repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Allocate note and comment ids from monotonic per-entity counters.
//! - Keep notes and comments addressable by id, including tombstoned rows.
//!
//! # Invariants
//! - Ids start at 1, strictly increase, and are never reused.
//! - Rows are never removed; deletion is a tombstone set by callers.
//! - Listing returns rows in insertion (id) order.
//! - A comment can only be created for a note that exists.

use crate::model::comment::{Comment, CommentDraft, CommentId};
use crate::model::note::{Note, NoteDraft, NoteId};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note/comment storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NoteNotFound(NoteId),
    CommentNotFound(CommentId),
    /// Failure reported by an external storage backend.
    Backend(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::CommentNotFound(id) => write!(f, "comment not found: {id}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for RepoError {}

/// Storage contract used by `NoteService`.
///
/// Reads return owned snapshots; writes replace the stored row by id.
pub trait NoteRepository {
    /// Stores a new note and returns its freshly allocated id.
    fn create_note(&mut self, draft: NoteDraft) -> RepoResult<NoteId>;
    /// Gets one note by id, tombstoned or not.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Replaces the stored note with the same id.
    fn update_note(&mut self, note: &Note) -> RepoResult<()>;
    /// Lists notes in insertion order.
    fn list_notes(&self, include_deleted: bool) -> RepoResult<Vec<Note>>;
    /// Stores a new comment and returns its freshly allocated id.
    fn create_comment(&mut self, draft: CommentDraft) -> RepoResult<CommentId>;
    /// Gets one comment by id, tombstoned or not.
    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    /// Replaces the stored comment with the same id.
    fn update_comment(&mut self, comment: &Comment) -> RepoResult<()>;
    /// Lists one note's comments in insertion order.
    fn list_comments(&self, note_id: NoteId, include_deleted: bool) -> RepoResult<Vec<Comment>>;
}

/// Process-local note/comment tables.
///
/// Notes and comments are keyed by id, and each note keeps an index of its
/// comment ids, so lookups never scan whole tables.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    notes: BTreeMap<NoteId, Note>,
    comments: BTreeMap<CommentId, Comment>,
    comments_by_note: BTreeMap<NoteId, Vec<CommentId>>,
    last_note_id: NoteId,
    last_comment_id: CommentId,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes, tombstones included.
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Number of stored comments, tombstones included.
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

impl NoteRepository for InMemoryNoteRepository {
    fn create_note(&mut self, draft: NoteDraft) -> RepoResult<NoteId> {
        let id = self.last_note_id + 1;
        self.notes.insert(id, Note::from_draft(id, draft));
        self.last_note_id = id;
        Ok(id)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        Ok(self.notes.get(&id).cloned())
    }

    fn update_note(&mut self, note: &Note) -> RepoResult<()> {
        let stored = self
            .notes
            .get_mut(&note.id)
            .ok_or(RepoError::NoteNotFound(note.id))?;
        *stored = note.clone();
        Ok(())
    }

    fn list_notes(&self, include_deleted: bool) -> RepoResult<Vec<Note>> {
        Ok(self
            .notes
            .values()
            .filter(|note| include_deleted || note.is_active())
            .cloned()
            .collect())
    }

    fn create_comment(&mut self, draft: CommentDraft) -> RepoResult<CommentId> {
        if !self.notes.contains_key(&draft.note_id) {
            return Err(RepoError::NoteNotFound(draft.note_id));
        }

        let id = self.last_comment_id + 1;
        let note_id = draft.note_id;
        self.comments.insert(id, Comment::from_draft(id, draft));
        self.comments_by_note.entry(note_id).or_default().push(id);
        self.last_comment_id = id;
        Ok(id)
    }

    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.comments.get(&id).cloned())
    }

    fn update_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        let stored = self
            .comments
            .get_mut(&comment.id)
            .ok_or(RepoError::CommentNotFound(comment.id))?;
        *stored = comment.clone();
        Ok(())
    }

    fn list_comments(&self, note_id: NoteId, include_deleted: bool) -> RepoResult<Vec<Comment>> {
        let Some(ids) = self.comments_by_note.get(&note_id) else {
            return Ok(Vec::new());
        };

        Ok(ids
            .iter()
            .filter_map(|id| self.comments.get(id))
            .filter(|comment| include_deleted || comment.is_active())
            .cloned()
            .collect())
    }
}
