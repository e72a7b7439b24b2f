//! Note domain model.
//!
//! # Responsibility
//! - Define the note record and its comment-privacy tier.
//! - Define the fixed read projection returned to API layers.
//!
//! # Invariants
//! - `id` and `owner_id` never change after creation.
//! - `is_deleted` is the source of truth for tombstone state.

use serde::{Deserialize, Serialize};

/// Stable note identifier allocated by the repository.
pub type NoteId = u64;

/// Identifier of an acting or owning user.
pub type UserId = u64;

/// Who may comment on a note.
///
/// Serialized as its raw integer tier so API payloads keep the numeric
/// contract (`0..=3`). Values outside that range are kept in `Other`
/// and deny commenting to everyone but the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum CommentPrivacy {
    /// Tier `0`.
    #[default]
    Everyone,
    /// Tier `1`.
    Friends,
    /// Tier `2`.
    FriendsOfFriends,
    /// Tier `3`.
    OwnerOnly,
    /// Unrecognized tier, preserved as stored.
    Other(i32),
}

impl CommentPrivacy {
    /// Maps a raw tier value, preserving unknown values.
    pub fn from_tier(tier: i32) -> Self {
        match tier {
            0 => Self::Everyone,
            1 => Self::Friends,
            2 => Self::FriendsOfFriends,
            3 => Self::OwnerOnly,
            other => Self::Other(other),
        }
    }

    /// Returns the raw tier value.
    pub fn tier(self) -> i32 {
        match self {
            Self::Everyone => 0,
            Self::Friends => 1,
            Self::FriendsOfFriends => 2,
            Self::OwnerOnly => 3,
            Self::Other(value) => value,
        }
    }
}

impl From<i32> for CommentPrivacy {
    fn from(value: i32) -> Self {
        Self::from_tier(value)
    }
}

impl From<CommentPrivacy> for i32 {
    fn from(value: CommentPrivacy) -> Self {
        value.tier()
    }
}

/// Creation input for a note. The repository allocates the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub owner_id: UserId,
    pub title: String,
    pub text: String,
}

/// User-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Creator of the note.
    pub owner_id: UserId,
    pub title: String,
    pub text: String,
    /// Read-gating tier for the note itself. Stored and returned only.
    pub privacy: i32,
    pub comment_privacy: CommentPrivacy,
    /// Soft delete tombstone.
    pub is_deleted: bool,
}

impl Note {
    /// Materializes a draft under an allocated id.
    ///
    /// New notes start with `privacy = 0`, `CommentPrivacy::Everyone` and
    /// no tombstone.
    pub fn from_draft(id: NoteId, draft: NoteDraft) -> Self {
        Self {
            id,
            owner_id: draft.owner_id,
            title: draft.title,
            text: draft.text,
            privacy: 0,
            comment_privacy: CommentPrivacy::Everyone,
            is_deleted: false,
        }
    }

    /// Marks this note as softly deleted.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this note is visible to read queries.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Field map returned by single-note reads.
///
/// Serialized keys: `id, owner_id, title, text, privacy, comment_privacy,
/// can_comment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteView {
    pub id: NoteId,
    pub owner_id: UserId,
    pub title: String,
    pub text: String,
    pub privacy: i32,
    pub comment_privacy: i32,
    /// `1` when the viewing actor may comment, `0` otherwise.
    pub can_comment: u8,
}

impl NoteView {
    pub(crate) fn new(note: Note, can_comment: bool) -> Self {
        Self {
            id: note.id,
            owner_id: note.owner_id,
            title: note.title,
            text: note.text,
            privacy: note.privacy,
            comment_privacy: note.comment_privacy.tier(),
            can_comment: u8::from(can_comment),
        }
    }
}
