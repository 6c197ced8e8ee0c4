use magazine_core::{
    Author, AuthorRepository, ImmutableFieldError, ModelError, RepoError, SqliteAuthorRepository,
    Store, ValidationErrorKind,
};

fn temp_store() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::at(dir.path().join("magazine.db"));
    store.initialize().unwrap();
    (dir, store)
}

fn author_count(store: &Store) -> i64 {
    store
        .connect()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_save_and_find_by_id() {
    let (_dir, store) = temp_store();
    let repo = SqliteAuthorRepository::new(&store);

    let author = Author::new("Alice").unwrap();
    assert_eq!(author.id(), None);

    let id = repo.save(&author).unwrap();
    assert_eq!(author.id(), Some(id));

    let found = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(found.id(), Some(id));
    assert_eq!(found.name(), "Alice");
}

#[test]
fn names_round_trip_unchanged() {
    let (_dir, store) = temp_store();
    let repo = SqliteAuthorRepository::new(&store);

    for name in ["A", "Zoë Ågren", "O'Brien; DROP TABLE authors;--", "  padded  "] {
        let author = Author::new(name).unwrap();
        let id = repo.save(&author).unwrap();
        assert_eq!(repo.find_by_id(id).unwrap().unwrap().name(), name);
    }
    assert_eq!(author_count(&store), 4);
}

#[test]
fn name_is_read_only_after_save() {
    let (_dir, store) = temp_store();
    let repo = SqliteAuthorRepository::new(&store);

    let mut author = Author::new("Bob").unwrap();
    let err = author.set_name("Robert").unwrap_err();
    assert_eq!(
        err,
        ModelError::Immutable(ImmutableFieldError {
            field: "author name"
        })
    );

    repo.save(&author).unwrap();
    assert!(matches!(
        author.set_name("Robert"),
        Err(ModelError::Immutable(_))
    ));
    assert_eq!(author.name(), "Bob");
}

#[test]
fn empty_name_is_rejected_and_nothing_is_written() {
    let (_dir, store) = temp_store();

    let err = Author::new("").unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::Empty);
    assert_eq!(author_count(&store), 0);
}

#[test]
fn second_save_updates_in_place() {
    let (_dir, store) = temp_store();
    let repo = SqliteAuthorRepository::new(&store);

    let author = Author::new("Dana").unwrap();
    let first = repo.save(&author).unwrap();
    let second = repo.save(&author).unwrap();

    assert_eq!(first, second);
    assert_eq!(author_count(&store), 1);
}

#[test]
fn find_missing_returns_none() {
    let (_dir, store) = temp_store();
    let repo = SqliteAuthorRepository::new(&store);

    assert!(repo.find_by_id(4242).unwrap().is_none());
}

#[test]
fn saving_author_whose_row_vanished_is_not_found() {
    let (_dir, store) = temp_store();
    let repo = SqliteAuthorRepository::new(&store);

    let author = Author::new("Eve").unwrap();
    let id = repo.save(&author).unwrap();
    store
        .connect()
        .unwrap()
        .execute("DELETE FROM authors WHERE id = ?1;", [id])
        .unwrap();

    let err = repo.save(&author).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "author", id: missing } if missing == id));
}

#[test]
fn stored_non_text_name_is_a_type_error() {
    let (_dir, store) = temp_store();
    let repo = SqliteAuthorRepository::new(&store);

    let conn = store.connect().unwrap();
    conn.execute("INSERT INTO authors (name) VALUES (X'00FF');", [])
        .unwrap();
    let id = conn.last_insert_rowid();
    drop(conn);

    match repo.find_by_id(id).unwrap_err() {
        RepoError::Validation(err) => {
            assert_eq!(err.kind, ValidationErrorKind::Type);
            assert_eq!(err.field, "author name");
        }
        other => panic!("unexpected error: {other}"),
    }
}
