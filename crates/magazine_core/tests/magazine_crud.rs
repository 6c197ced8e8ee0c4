use magazine_core::{
    Magazine, MagazineRepository, RepoError, SqliteMagazineRepository, Store, ValidationErrorKind,
};

fn temp_store() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::at(dir.path().join("magazine.db"));
    store.initialize().unwrap();
    (dir, store)
}

#[test]
fn create_update_and_find_by_id() {
    let (_dir, store) = temp_store();
    let repo = SqliteMagazineRepository::new(&store);

    let magazine = Magazine::new("Tech Today", "Technology").unwrap();
    assert_eq!(magazine.id(), None);

    let id = repo.save(&magazine).unwrap();
    let fetched = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.name(), "Tech Today");
    assert_eq!(fetched.category(), "Technology");

    magazine.set_name("Tech Tomorrow").unwrap();
    magazine.set_category("Science").unwrap();
    assert_eq!(repo.save(&magazine).unwrap(), id);

    let updated = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(updated.id(), Some(id));
    assert_eq!(updated.name(), "Tech Tomorrow");
    assert_eq!(updated.category(), "Science");

    let rows: i64 = store
        .connect()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM magazines;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn validations_report_field_and_kind() {
    let err = Magazine::new("", "Category").unwrap_err();
    assert_eq!((err.field, err.kind), ("magazine name", ValidationErrorKind::Empty));

    let err = Magazine::new("Name", "").unwrap_err();
    assert_eq!(
        (err.field, err.kind),
        ("magazine category", ValidationErrorKind::Empty)
    );
}

#[test]
fn reconstructed_magazine_is_still_mutable() {
    let (_dir, store) = temp_store();
    let repo = SqliteMagazineRepository::new(&store);

    let original = Magazine::new("Garden Weekly", "Home").unwrap();
    let id = repo.save(&original).unwrap();

    let fetched = repo.find_by_id(id).unwrap().unwrap();
    fetched.set_category("Outdoors").unwrap();
    repo.save(&fetched).unwrap();

    assert_eq!(repo.find_by_id(id).unwrap().unwrap().category(), "Outdoors");
}

#[test]
fn find_missing_returns_none() {
    let (_dir, store) = temp_store();
    let repo = SqliteMagazineRepository::new(&store);

    assert!(repo.find_by_id(99).unwrap().is_none());
}

#[test]
fn stored_non_text_category_is_a_type_error() {
    let (_dir, store) = temp_store();
    let conn = store.connect().unwrap();
    conn.execute(
        "INSERT INTO magazines (name, category) VALUES ('Binary Monthly', X'01');",
        [],
    )
    .unwrap();
    let id = conn.last_insert_rowid();
    drop(conn);

    match SqliteMagazineRepository::new(&store).find_by_id(id).unwrap_err() {
        RepoError::Validation(err) => {
            assert_eq!(err.kind, ValidationErrorKind::Type);
            assert_eq!(err.field, "magazine category");
        }
        other => panic!("unexpected error: {other}"),
    }
}
