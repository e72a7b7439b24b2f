use notewall_core::{
    AdjacentIdGraph, CommentPrivacy, ErrorKind, NoteListQuery, NoteService, NoteServiceError,
    NoteRepository,
};

const OWNER: u64 = 1;
const OTHER: u64 = 7;

fn service() -> NoteService<notewall_core::InMemoryNoteRepository, AdjacentIdGraph> {
    NoteService::new(AdjacentIdGraph)
}

#[test]
fn add_returns_increasing_ids_from_one_even_after_deletes() {
    let mut service = service();
    let first = service.add(OWNER, "a", "a").unwrap();
    let second = service.add(OTHER, "b", "b").unwrap();
    service.delete(OWNER, first).unwrap();
    let third = service.add(OWNER, "c", "c").unwrap();

    assert_eq!((first, second, third), (1, 2, 3));
}

#[test]
fn add_creates_public_active_note_for_actor() {
    let mut service = service();
    let note_id = service.add(OWNER, "Title", "Body").unwrap();

    let note = service.repository().get_note(note_id).unwrap().unwrap();
    assert_eq!(note.owner_id, OWNER);
    assert_eq!(note.title, "Title");
    assert_eq!(note.text, "Body");
    assert_eq!(note.privacy, 0);
    assert_eq!(note.comment_privacy, CommentPrivacy::Everyone);
    assert!(!note.is_deleted);
}

#[test]
fn edit_overwrites_title_and_text() {
    let mut service = service();
    let note_id = service.add(OWNER, "old", "old body").unwrap();
    service.edit(OWNER, note_id, "new", "").unwrap();

    let view = service.get_by_id(OWNER, note_id, OWNER, false).unwrap();
    assert_eq!(view.title, "new");
    assert_eq!(view.text, "");
}

#[test]
fn edit_of_foreign_or_unknown_note_is_not_found() {
    let mut service = service();
    let note_id = service.add(OWNER, "mine", "body").unwrap();

    let err = service.edit(OTHER, note_id, "hijack", "x").unwrap_err();
    assert_eq!(err, NoteServiceError::NoteNotFound(note_id));
    let err = service.edit(OWNER, 99, "t", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let note = service.repository().get_note(note_id).unwrap().unwrap();
    assert_eq!(note.title, "mine");
}

#[test]
fn edit_after_delete_is_permission_denied() {
    let mut service = service();
    let note_id = service.add(OWNER, "Old title", "Old text").unwrap();
    service.delete(OWNER, note_id).unwrap();

    let err = service
        .edit(OWNER, note_id, "New title", "New text")
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::PermissionDenied(_)));

    let note = service.repository().get_note(note_id).unwrap().unwrap();
    assert_eq!(note.title, "Old title");
}

#[test]
fn delete_of_unknown_note_is_not_found() {
    let mut service = service();
    let err = service.delete(OWNER, 999).unwrap_err();
    assert_eq!(err, NoteServiceError::NoteNotFound(999));
}

#[test]
fn delete_requires_ownership() {
    let mut service = service();
    let note_id = service.add(OWNER, "t", "x").unwrap();

    let err = service.delete(OTHER, note_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(service.get_by_id(OWNER, note_id, OWNER, false).is_ok());
}

#[test]
fn repeated_note_delete_succeeds() {
    let mut service = service();
    let note_id = service.add(OWNER, "t", "x").unwrap();
    service.delete(OWNER, note_id).unwrap();
    service.delete(OWNER, note_id).unwrap();

    let note = service.repository().get_note(note_id).unwrap().unwrap();
    assert!(note.is_deleted);
}

#[test]
fn deleted_note_leaves_every_read_path() {
    let mut service = service();
    let note_id = service.add(OWNER, "t", "x").unwrap();
    service.create_comment(OTHER, note_id, "hello", None).unwrap();
    service.delete(OWNER, note_id).unwrap();

    assert_eq!(
        service.get_by_id(OWNER, note_id, OWNER, false).unwrap_err(),
        NoteServiceError::NoteNotFound(note_id)
    );
    assert_eq!(
        service.get_comments(note_id).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        service.can_comment(OWNER, note_id).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert!(service.get(&NoteListQuery::default()).unwrap().is_empty());
    assert_eq!(
        service
            .create_comment(OTHER, note_id, "late", None)
            .unwrap_err(),
        NoteServiceError::NoteNotFound(note_id)
    );
}

#[test]
fn update_note_privacy_ignores_ownership_and_deletion() {
    let mut service = service();
    let note_id = service.add(OWNER, "t", "x").unwrap();
    service
        .update_note_privacy(note_id, CommentPrivacy::OwnerOnly)
        .unwrap();
    service.delete(OWNER, note_id).unwrap();
    service
        .update_note_privacy(note_id, CommentPrivacy::from_tier(8))
        .unwrap();

    let note = service.repository().get_note(note_id).unwrap().unwrap();
    assert_eq!(note.comment_privacy, CommentPrivacy::Other(8));
}

#[test]
fn update_note_privacy_of_unknown_note_is_not_found() {
    let mut service = service();
    let err = service
        .update_note_privacy(5, CommentPrivacy::Friends)
        .unwrap_err();
    assert_eq!(err, NoteServiceError::NoteNotFound(5));
}
