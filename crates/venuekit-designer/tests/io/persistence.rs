use std::sync::Arc;
use venuekit_core::{AreaKind, Scope, StoreError, TableType};
use venuekit_designer::persistence::{autosave_name, validate_name};
use venuekit_designer::model::{Area, TableField};
use venuekit_designer::{
    AutoSaver, DesignerState, FileSnapshotStore, LayoutSnapshot, MemorySnapshotStore,
    NamedSnapshot, Point, SnapshotStore,
};

fn layout_with_tables(count: u32) -> DesignerState {
    let mut state = DesignerState::new();
    state.set_session_id("wedding-42");
    for i in 0..count {
        state
            .add_table(TableType::Round, Some(Point::new(300.0 + 400.0 * i as f64, 300.0)))
            .unwrap();
    }
    state
}

async fn exercise_store(store: &dyn SnapshotStore) {
    let mut state = layout_with_tables(2);
    state
        .add_table(TableType::Imperial, Some(Point::new(961.1757480989835, 320.4)))
        .unwrap();
    state
        .update_table_field(3, TableField::Rotation, 33.3)
        .unwrap();
    state
        .add_area(Area::new(
            AreaKind::Obstacle,
            vec![
                Point::new(0.1, 0.2),
                Point::new(1234.5678901234567, 0.3),
                Point::new(77.7, 999.99),
            ],
        ))
        .unwrap();
    let draft = state.committed_snapshot(Scope::Banquet).clone();
    state.save_named(store, "draft").await.unwrap();

    state.add_table(TableType::Cocktail, None).unwrap();
    state.save_named(store, "final").await.unwrap();

    let listed = state.list_named(store).await.unwrap();
    let names: Vec<&str> = listed.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["draft", "final"]);
    assert!(listed.iter().all(|i| i.scope == Scope::Banquet));

    let scope = state.load_named(store, "draft").await.unwrap();
    assert_eq!(scope, Scope::Banquet);
    assert_eq!(state.committed_snapshot(Scope::Banquet), &draft);

    // reloading identical content records nothing, so one undo reaches
    // the layout from before the first load
    state.load_named(store, "draft").await.unwrap();
    state.undo().unwrap();
    assert_eq!(state.tables().len(), 4);

    state.delete_named(store, "draft").await.unwrap();
    assert_eq!(state.list_named(store).await.unwrap().len(), 1);
    assert!(state.load_named(store, "draft").await.is_err());
    assert!(matches!(
        store.delete("wedding-42", "draft").await,
        Err(StoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_memory_store_round_trip() {
    let store = MemorySnapshotStore::new();
    exercise_store(&store).await;
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path());
    exercise_store(&store).await;
    assert!(dir.path().join("wedding-42").join("final.json").exists());
}

#[tokio::test]
async fn test_sessions_are_separate() {
    let store = MemorySnapshotStore::new();
    let named = NamedSnapshot::new("plan", Scope::Ceremony, LayoutSnapshot::default());
    store.save("a", &named).await.unwrap();
    assert!(store.list("b").await.unwrap().is_empty());
    assert!(matches!(
        store.load("b", "plan").await,
        Err(StoreError::NotFound { .. })
    ));
    assert_eq!(store.load("a", "plan").await.unwrap(), named);
}

#[tokio::test]
async fn test_load_switches_to_saved_scope() {
    let store = MemorySnapshotStore::new();
    let mut state = layout_with_tables(0);
    state.set_active_scope(Scope::Ceremony);
    state.generate_seat_grid().unwrap();
    state.save_named(&store, "chairs").await.unwrap();

    let mut other = layout_with_tables(1);
    assert_eq!(other.active_scope(), Scope::Banquet);
    assert_eq!(other.load_named(&store, "chairs").await.unwrap(), Scope::Ceremony);
    assert_eq!(other.active_scope(), Scope::Ceremony);
    assert_eq!(other.snapshot().seats.len(), 80);
    // the banquet layout is untouched
    assert_eq!(other.snapshot_of(Scope::Banquet).tables.len(), 1);
}

#[tokio::test]
async fn test_invalid_names_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file_store = FileSnapshotStore::new(dir.path());
    let memory_store = MemorySnapshotStore::new();
    let state = layout_with_tables(1);

    for name in ["", "../escape", " padded", "a/b"] {
        assert!(matches!(
            state.save_named(&memory_store, name).await,
            Err(venuekit_core::Error::Store(StoreError::InvalidName { .. }))
        ));
        assert!(state.save_named(&file_store, name).await.is_err());
    }
    assert!(validate_name("Plan B (final)").is_ok());
}

#[tokio::test]
async fn test_file_store_skips_unreadable_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path());
    let named = NamedSnapshot::new("good", Scope::Banquet, LayoutSnapshot::default());
    store.save("s", &named).await.unwrap();
    std::fs::write(dir.path().join("s").join("broken.json"), "{ not json").unwrap();
    std::fs::write(dir.path().join("s").join("notes.txt"), "ignored").unwrap();

    let listed = store.list("s").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "good");
    assert!(matches!(
        store.load("s", "broken").await,
        Err(StoreError::Serialization { .. })
    ));
    assert!(store.list("missing").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_autosave_persists_latest_per_scope() {
    let store = Arc::new(MemorySnapshotStore::new());
    let saver = AutoSaver::from_current(store.clone(), "wedding-42").unwrap();
    assert_eq!(saver.session(), "wedding-42");

    let mut state = layout_with_tables(2);
    state.commit_move(1, Point::new(500.0, 500.0)).unwrap();
    state.set_active_scope(Scope::Ceremony);
    state.add_table(TableType::Imperial, None).unwrap();

    let handle = saver.persist(state.drain_changes()).unwrap();
    handle.await.unwrap();
    assert!(saver.persist(state.drain_changes()).is_none());

    let banquet = store
        .load("wedding-42", &autosave_name(Scope::Banquet))
        .await
        .unwrap();
    assert_eq!(banquet.snapshot.tables.len(), 2);
    assert_eq!(banquet.snapshot.tables[0].position, Point::new(500.0, 500.0));

    let ceremony = store
        .load("wedding-42", "autosave-ceremony")
        .await
        .unwrap();
    assert_eq!(ceremony.scope, Scope::Ceremony);
    assert_eq!(ceremony.snapshot.tables.len(), 1);
}

#[test]
fn test_snapshot_json_keeps_layout() {
    let state = layout_with_tables(3);
    let named = NamedSnapshot::new("x", Scope::Banquet, state.snapshot().clone());
    let json = named.to_json().unwrap();
    assert!(json.contains("\"format_version\": \"1.0\""));
    let back = NamedSnapshot::from_json(&json).unwrap();
    assert_eq!(back.snapshot, *state.snapshot());
    assert!(NamedSnapshot::from_json("[]").is_err());
}
