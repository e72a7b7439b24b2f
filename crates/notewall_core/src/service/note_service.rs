//! Note and comment use-case service.
//!
//! # Responsibility
//! - Create, edit, delete and read notes on behalf of an explicit actor.
//! - Manage comment authorship, tombstones and restoration.
//! - Compute `can_comment` on demand from the note's privacy tier.
//!
//! # Invariants
//! - Every operation validates before it mutates; a failed call changes nothing.
//! - Read paths never return tombstoned notes or comments.
//! - Deleting a note twice succeeds; deleting a comment twice is denied.
//! - `create_comment` and `get_comments` do not consult the privacy tier.
//!   Callers gate them with `can_comment`.

use crate::model::comment::{Comment, CommentDraft, CommentId};
use crate::model::note::{CommentPrivacy, Note, NoteDraft, NoteId, NoteView, UserId};
use crate::repo::note_repo::{InMemoryNoteRepository, NoteRepository, RepoError};
use crate::service::clock::{Clock, SystemClock};
use crate::service::policy;
use crate::social::graph::RelationshipGraph;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Shortest accepted comment message, in characters.
pub const MIN_COMMENT_MESSAGE_CHARS: usize = 2;
/// Value returned by a successful `edit_comment`.
pub const COMMENT_EDITED: u8 = 1;
const NOTES_DEFAULT_COUNT: usize = 10;

pub type ServiceResult<T> = Result<T, NoteServiceError>;

/// Failure category callers should branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    InvalidArgument,
    Storage,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::PermissionDenied => "permission_denied",
            Self::InvalidArgument => "invalid_argument",
            Self::Storage => "storage",
        }
    }
}

/// Service error for note/comment use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteServiceError {
    /// No note matches the id under the operation's ownership/deletion filter.
    NoteNotFound(NoteId),
    /// No comment matches the id under the operation's ownership/deletion filter.
    CommentNotFound(CommentId),
    /// The target exists but the actor or its tombstone state forbids the call.
    PermissionDenied(&'static str),
    /// Input failed a structural check before any lookup.
    InvalidArgument(String),
    /// Storage backend failure.
    Repo(RepoError),
}

impl NoteServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoteNotFound(_) | Self::CommentNotFound(_) => ErrorKind::NotFound,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Repo(_) => ErrorKind::Storage,
        }
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::CommentNotFound(id) => write!(f, "comment not found: {id}"),
            Self::PermissionDenied(reason) => write!(f, "permission denied: {reason}"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NoteNotFound(id) => Self::NoteNotFound(id),
            RepoError::CommentNotFound(id) => Self::CommentNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Ordering applied by `NoteService::get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteSort {
    /// Latest comment first. Code `0`.
    #[default]
    ActivityDesc,
    /// Oldest comment activity first. Code `1`.
    ActivityAsc,
    /// Creation order. Any other code.
    Insertion,
}

impl NoteSort {
    /// Maps an API sort code; unknown codes keep insertion order.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::ActivityDesc,
            1 => Self::ActivityAsc,
            _ => Self::Insertion,
        }
    }
}

/// Filter, ordering and window options for note listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListQuery {
    /// Restricts results to these ids when set.
    pub note_ids: Option<Vec<NoteId>>,
    /// Restricts results to one owner when set.
    pub owner_id: Option<UserId>,
    /// Number of ordered rows to skip.
    pub offset: usize,
    /// Maximum rows to return. Defaults to 10.
    pub count: usize,
    pub sort: NoteSort,
}

impl Default for NoteListQuery {
    fn default() -> Self {
        Self {
            note_ids: None,
            owner_id: None,
            offset: 0,
            count: NOTES_DEFAULT_COUNT,
            sort: NoteSort::default(),
        }
    }
}

impl NoteListQuery {
    fn matches(&self, note: &Note) -> bool {
        let id_ok = self
            .note_ids
            .as_ref()
            .map_or(true, |ids| ids.contains(&note.id));
        let owner_ok = self.owner_id.map_or(true, |owner| owner == note.owner_id);
        id_ok && owner_ok
    }
}

/// Access-controlled facade over note/comment storage.
///
/// The acting user is passed to every call; the service holds no session
/// state, so one instance can serve any number of actors.
pub struct NoteService<R: NoteRepository, G: RelationshipGraph> {
    repo: R,
    graph: G,
    clock: Box<dyn Clock + Send + Sync>,
}

impl<G: RelationshipGraph> NoteService<InMemoryNoteRepository, G> {
    /// Creates a service over empty in-memory tables and the system clock.
    pub fn new(graph: G) -> Self {
        Self::with_parts(InMemoryNoteRepository::new(), graph, SystemClock)
    }
}

impl<R: NoteRepository, G: RelationshipGraph> NoteService<R, G> {
    /// Creates a service from explicit collaborators.
    pub fn with_parts(repo: R, graph: G, clock: impl Clock + Send + Sync + 'static) -> Self {
        Self {
            repo,
            graph,
            clock: Box::new(clock),
        }
    }

    /// Read-only access to the backing repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates a note owned by `actor` and returns its id.
    pub fn add(
        &mut self,
        actor: UserId,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> ServiceResult<NoteId> {
        let note_id = self.repo.create_note(NoteDraft {
            owner_id: actor,
            title: title.into(),
            text: text.into(),
        })?;
        info!("event=note_add module=note_service status=ok note_id={note_id} owner_id={actor}");
        Ok(note_id)
    }

    /// Replaces title and text of a note owned by `actor`.
    ///
    /// # Errors
    /// - `NoteNotFound` when `actor` owns no note with this id.
    /// - `PermissionDenied` when the note is deleted.
    pub fn edit(
        &mut self,
        actor: UserId,
        note_id: NoteId,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> ServiceResult<()> {
        let mut note = self.owned_note(actor, note_id)?;
        if note.is_deleted {
            return Err(denied("note_edit", "cannot edit a deleted note"));
        }

        note.title = title.into();
        note.text = text.into();
        self.repo.update_note(&note)?;
        info!("event=note_edit module=note_service status=ok note_id={note_id}");
        Ok(())
    }

    /// Soft-deletes a note owned by `actor`.
    ///
    /// Deleting an already deleted note succeeds.
    pub fn delete(&mut self, actor: UserId, note_id: NoteId) -> ServiceResult<()> {
        let mut note = self.owned_note(actor, note_id)?;
        note.soft_delete();
        self.repo.update_note(&note)?;
        info!("event=note_delete module=note_service status=ok note_id={note_id}");
        Ok(())
    }

    /// Adds a comment by `actor` to an active note.
    ///
    /// The comment's `owner_id` is the note owner. The note's comment
    /// privacy is not checked here; see `can_comment`.
    pub fn create_comment(
        &mut self,
        actor: UserId,
        note_id: NoteId,
        message: impl Into<String>,
        reply_to: Option<CommentId>,
    ) -> ServiceResult<CommentId> {
        let note = self.active_note(note_id)?;
        let comment_id = self.repo.create_comment(CommentDraft {
            note_id,
            owner_id: note.owner_id,
            user_id: actor,
            message: message.into(),
            reply_to,
            date: self.clock.now_epoch_ms(),
        })?;
        info!(
            "event=comment_create module=note_service status=ok comment_id={comment_id} note_id={note_id} author_id={actor}"
        );
        Ok(comment_id)
    }

    /// Soft-deletes a comment written by `actor`.
    ///
    /// # Errors
    /// - `CommentNotFound` when the id is unknown.
    /// - `PermissionDenied` when `actor` is not the author or the comment is
    ///   already deleted.
    pub fn delete_comment(&mut self, actor: UserId, comment_id: CommentId) -> ServiceResult<()> {
        let mut comment = self.authored_comment("comment_delete", actor, comment_id)?;
        if comment.is_deleted {
            return Err(denied("comment_delete", "comment is already deleted"));
        }

        comment.soft_delete();
        self.repo.update_comment(&comment)?;
        info!("event=comment_delete module=note_service status=ok comment_id={comment_id}");
        Ok(())
    }

    /// Restores a deleted comment written by `actor`.
    ///
    /// # Errors
    /// - `CommentNotFound` when the id is unknown.
    /// - `PermissionDenied` when `actor` is not the author or the comment is
    ///   not deleted.
    pub fn restore_comment(&mut self, actor: UserId, comment_id: CommentId) -> ServiceResult<()> {
        let mut comment = self.authored_comment("comment_restore", actor, comment_id)?;
        if comment.is_active() {
            return Err(denied("comment_restore", "comment is not deleted"));
        }

        comment.restore();
        self.repo.update_comment(&comment)?;
        info!("event=comment_restore module=note_service status=ok comment_id={comment_id}");
        Ok(())
    }

    /// Lists active comments of an active note in creation order.
    pub fn get_comments(&self, note_id: NoteId) -> ServiceResult<Vec<Comment>> {
        self.active_note(note_id)?;
        Ok(self.repo.list_comments(note_id, false)?)
    }

    /// Gets one active comment by id.
    pub fn get_comment(&self, comment_id: CommentId) -> ServiceResult<Comment> {
        self.repo
            .get_comment(comment_id)?
            .filter(Comment::is_active)
            .ok_or(NoteServiceError::CommentNotFound(comment_id))
    }

    /// Replaces the message of a comment written by `actor`.
    ///
    /// `note_owner_id` must equal the comment's stored `owner_id`, i.e. the
    /// owner of the commented note, not the author. Returns `COMMENT_EDITED`.
    ///
    /// # Errors
    /// - `InvalidArgument` when `message` is shorter than
    ///   `MIN_COMMENT_MESSAGE_CHARS`, before any lookup.
    /// - `CommentNotFound` when no comment matches id and note owner.
    /// - `PermissionDenied` when `actor` is not the author or the comment is
    ///   deleted.
    pub fn edit_comment(
        &mut self,
        actor: UserId,
        comment_id: CommentId,
        note_owner_id: UserId,
        message: impl Into<String>,
    ) -> ServiceResult<u8> {
        let message = message.into();
        let length = message.chars().count();
        if length < MIN_COMMENT_MESSAGE_CHARS {
            return Err(NoteServiceError::InvalidArgument(format!(
                "comment message must be at least {MIN_COMMENT_MESSAGE_CHARS} characters, got {length}"
            )));
        }

        let mut comment = self
            .repo
            .get_comment(comment_id)?
            .filter(|comment| comment.owner_id == note_owner_id)
            .ok_or(NoteServiceError::CommentNotFound(comment_id))?;
        if !comment.is_authored_by(actor) {
            return Err(denied("comment_edit", "not the comment author"));
        }
        if comment.is_deleted {
            return Err(denied("comment_edit", "cannot edit a deleted comment"));
        }

        comment.message = message;
        self.repo.update_comment(&comment)?;
        info!("event=comment_edit module=note_service status=ok comment_id={comment_id}");
        Ok(COMMENT_EDITED)
    }

    /// Lists active notes matching `query`.
    ///
    /// Activity sorts order by the newest active comment date (0 for notes
    /// without comments); ties keep creation order. The `offset`/`count`
    /// window is applied last.
    pub fn get(&self, query: &NoteListQuery) -> ServiceResult<Vec<Note>> {
        let notes = self
            .repo
            .list_notes(false)?
            .into_iter()
            .filter(|note| query.matches(note));

        let ordered: Vec<Note> = match query.sort {
            NoteSort::Insertion => notes.collect(),
            NoteSort::ActivityDesc | NoteSort::ActivityAsc => {
                let mut keyed = Vec::new();
                for note in notes {
                    keyed.push((self.activity_timestamp(note.id)?, note));
                }
                if query.sort == NoteSort::ActivityDesc {
                    keyed.sort_by(|left, right| right.0.cmp(&left.0));
                } else {
                    keyed.sort_by(|left, right| left.0.cmp(&right.0));
                }
                keyed.into_iter().map(|(_, note)| note).collect()
            }
        };

        Ok(ordered
            .into_iter()
            .skip(query.offset)
            .take(query.count)
            .collect())
    }

    /// Reads one active note as seen by `actor`.
    ///
    /// `need_wiki` is accepted for API compatibility and does not change the
    /// result.
    pub fn get_by_id(
        &self,
        actor: UserId,
        note_id: NoteId,
        owner_id: UserId,
        need_wiki: bool,
    ) -> ServiceResult<NoteView> {
        let note = self
            .repo
            .get_note(note_id)?
            .filter(|note| note.owner_id == owner_id && note.is_active())
            .ok_or(NoteServiceError::NoteNotFound(note_id))?;

        let can_comment =
            policy::can_comment(&self.graph, actor, note.owner_id, note.comment_privacy);
        debug!(
            "event=note_get module=note_service status=ok note_id={note_id} actor_id={actor} can_comment={can_comment} need_wiki={need_wiki}"
        );
        Ok(NoteView::new(note, can_comment))
    }

    /// Returns whether `actor` may comment on an active note.
    pub fn can_comment(&self, actor: UserId, note_id: NoteId) -> ServiceResult<bool> {
        let note = self.active_note(note_id)?;
        Ok(policy::can_comment(
            &self.graph,
            actor,
            note.owner_id,
            note.comment_privacy,
        ))
    }

    /// Overwrites a note's comment privacy tier.
    ///
    /// Any actor may call this, and deleted notes are updated too.
    pub fn update_note_privacy(
        &mut self,
        note_id: NoteId,
        comment_privacy: CommentPrivacy,
    ) -> ServiceResult<()> {
        let mut note = self
            .repo
            .get_note(note_id)?
            .ok_or(NoteServiceError::NoteNotFound(note_id))?;
        note.comment_privacy = comment_privacy;
        self.repo.update_note(&note)?;
        info!(
            "event=note_privacy_update module=note_service status=ok note_id={note_id} comment_privacy={}",
            comment_privacy.tier()
        );
        Ok(())
    }

    fn owned_note(&self, actor: UserId, note_id: NoteId) -> ServiceResult<Note> {
        self.repo
            .get_note(note_id)?
            .filter(|note| note.owner_id == actor)
            .ok_or(NoteServiceError::NoteNotFound(note_id))
    }

    fn active_note(&self, note_id: NoteId) -> ServiceResult<Note> {
        self.repo
            .get_note(note_id)?
            .filter(Note::is_active)
            .ok_or(NoteServiceError::NoteNotFound(note_id))
    }

    fn authored_comment(
        &self,
        event: &'static str,
        actor: UserId,
        comment_id: CommentId,
    ) -> ServiceResult<Comment> {
        let comment = self
            .repo
            .get_comment(comment_id)?
            .ok_or(NoteServiceError::CommentNotFound(comment_id))?;
        if !comment.is_authored_by(actor) {
            return Err(denied(event, "not the comment author"));
        }
        Ok(comment)
    }

    fn activity_timestamp(&self, note_id: NoteId) -> ServiceResult<i64> {
        Ok(self
            .repo
            .list_comments(note_id, false)?
            .iter()
            .map(|comment| comment.date)
            .max()
            .unwrap_or(0))
    }
}

fn denied(event: &'static str, reason: &'static str) -> NoteServiceError {
    debug!("event={event} module=note_service status=rejected reason=\"{reason}\"");
    NoteServiceError::PermissionDenied(reason)
}
