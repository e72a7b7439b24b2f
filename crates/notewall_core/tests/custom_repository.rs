use notewall_core::{
    AdjacentIdGraph, Comment, CommentDraft, ErrorKind, InMemoryNoteRepository, Note, NoteDraft,
    NoteRepository, NoteService, NoteServiceError, RepoError, RepoResult, SystemClock,
};

/// Delegates to in-memory tables but fails every write once `read_only` is set.
#[derive(Default)]
struct ReadOnlyRepository {
    inner: InMemoryNoteRepository,
    read_only: bool,
}

impl ReadOnlyRepository {
    fn check_writable(&self) -> RepoResult<()> {
        if self.read_only {
            return Err(RepoError::Backend("repository is read-only".to_string()));
        }
        Ok(())
    }
}

impl NoteRepository for ReadOnlyRepository {
    fn create_note(&mut self, draft: NoteDraft) -> RepoResult<u64> {
        self.check_writable()?;
        self.inner.create_note(draft)
    }

    fn get_note(&self, id: u64) -> RepoResult<Option<Note>> {
        self.inner.get_note(id)
    }

    fn update_note(&mut self, note: &Note) -> RepoResult<()> {
        self.check_writable()?;
        self.inner.update_note(note)
    }

    fn list_notes(&self, include_deleted: bool) -> RepoResult<Vec<Note>> {
        self.inner.list_notes(include_deleted)
    }

    fn create_comment(&mut self, draft: CommentDraft) -> RepoResult<u64> {
        self.check_writable()?;
        self.inner.create_comment(draft)
    }

    fn get_comment(&self, id: u64) -> RepoResult<Option<Comment>> {
        self.inner.get_comment(id)
    }

    fn update_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        self.check_writable()?;
        self.inner.update_comment(comment)
    }

    fn list_comments(&self, note_id: u64, include_deleted: bool) -> RepoResult<Vec<Comment>> {
        self.inner.list_comments(note_id, include_deleted)
    }
}

#[test]
fn backend_failures_surface_as_storage_errors() {
    let mut repo = ReadOnlyRepository::default();
    let note_id = repo
        .create_note(NoteDraft {
            owner_id: 1,
            title: "seeded".to_string(),
            text: "body".to_string(),
        })
        .unwrap();
    repo.read_only = true;

    let mut service = NoteService::with_parts(repo, AdjacentIdGraph, SystemClock);
    let err = service.add(1, "t", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);

    let err = service.edit(1, note_id, "t", "x").unwrap_err();
    assert!(matches!(err, NoteServiceError::Repo(RepoError::Backend(_))));

    // Reads keep working.
    assert_eq!(service.get_by_id(1, note_id, 1, false).unwrap().title, "seeded");
}

#[test]
fn authorization_is_checked_before_storage_is_touched() {
    let mut repo = ReadOnlyRepository::default();
    let note_id = repo
        .create_note(NoteDraft {
            owner_id: 1,
            title: "seeded".to_string(),
            text: "body".to_string(),
        })
        .unwrap();
    repo.read_only = true;

    let mut service = NoteService::with_parts(repo, AdjacentIdGraph, SystemClock);
    let err = service.delete(2, note_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = service.edit_comment(1, 1, 1, "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
