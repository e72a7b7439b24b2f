//! Comment domain model.
//!
//! # Invariants
//! - `note_id`, `owner_id`, `user_id` and `date` never change after creation.
//! - `owner_id` is the owner of the commented note, not the author.
//! - `reply_to` is not validated for existence or cycles.

use crate::model::note::{NoteId, UserId};
use serde::{Deserialize, Serialize};

/// Stable comment identifier allocated by the repository.
pub type CommentId = u64;

/// Creation input for a comment. The repository allocates the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub note_id: NoteId,
    pub owner_id: UserId,
    pub user_id: UserId,
    pub message: String,
    pub reply_to: Option<CommentId>,
    pub date: i64,
}

/// Comment attached to a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub note_id: NoteId,
    /// Owner of the commented note at creation time.
    pub owner_id: UserId,
    /// Author of the comment.
    pub user_id: UserId,
    pub message: String,
    pub reply_to: Option<CommentId>,
    /// Creation time in Unix epoch milliseconds.
    pub date: i64,
    /// Soft delete tombstone.
    pub is_deleted: bool,
}

impl Comment {
    /// Materializes a draft under an allocated id.
    pub fn from_draft(id: CommentId, draft: CommentDraft) -> Self {
        Self {
            id,
            note_id: draft.note_id,
            owner_id: draft.owner_id,
            user_id: draft.user_id,
            message: draft.message,
            reply_to: draft.reply_to,
            date: draft.date,
            is_deleted: false,
        }
    }

    /// Marks this comment as softly deleted.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Returns whether `user_id` wrote this comment.
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
