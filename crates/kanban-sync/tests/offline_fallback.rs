mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use common::{column_id, offline_store, open_new_dashboard, OWNER};
use kanban_domain::{CardUpdate, ColumnId, FieldUpdate};
use kanban_persistence::{FileMedium, LocalStore, SlotStore};
use kanban_sync::{BoardBackend, BoardStore, LocalBackend, RemoteBoardGateway, SyncExecutor};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_first_listing_seeds_starter_dashboard() {
    let (store, slot) = offline_store();

    store.load_dashboards().await;

    let state = store.snapshot();
    assert_eq!(state.error, None);
    assert_eq!(state.dashboards.len(), 1);
    assert_eq!(state.dashboards[0].title, "My First Board");
    assert_eq!(slot.load().await.dashboards, state.dashboards);
}

#[tokio::test]
async fn test_create_card_falls_back_to_local_store() {
    let (store, slot) = offline_store();
    let dashboard = open_new_dashboard(&store, "Work").await;
    let todo = column_id(&store.snapshot().columns, "To Do");

    let card = store
        .create_card(&todo, "Write spec")
        .await
        .expect("card created locally");

    assert_eq!(card.title, "Write spec");
    assert_eq!(card.column_id, todo);
    let state = store.snapshot();
    assert_eq!(state.error, None);
    assert_eq!(state.column(&todo).unwrap().cards, vec![card.clone()]);

    let stored = slot.load().await;
    let stored_column = stored.dashboard(&dashboard.id).unwrap().column(&todo).unwrap();
    assert_eq!(stored_column.cards, vec![card]);
}

#[tokio::test]
async fn test_local_card_numbers_increase() {
    let (store, _) = offline_store();
    open_new_dashboard(&store, "Work").await;
    let todo = column_id(&store.snapshot().columns, "To Do");

    let first = store.create_card(&todo, "One").await.unwrap();
    let second = store.create_card(&todo, "Two").await.unwrap();

    assert!(second.number > first.number);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_update_card_falls_back() {
    let (store, _) = offline_store();
    open_new_dashboard(&store, "Work").await;
    let todo = column_id(&store.snapshot().columns, "To Do");
    let card = store.create_card(&todo, "Draft").await.unwrap();

    let updates = CardUpdate {
        title: Some("Final".into()),
        description: FieldUpdate::Set("Ready for review".into()),
        ..Default::default()
    };
    let updated = store.update_card(&todo, &card.id, &updates).await.unwrap();

    assert_eq!(updated.title, "Final");
    let state = store.snapshot();
    let merged = &state.column(&todo).unwrap().cards[0];
    assert_eq!(merged.description.as_deref(), Some("Ready for review"));
}

#[tokio::test]
async fn test_same_position_move_changes_nothing() {
    let (store, _) = offline_store();
    open_new_dashboard(&store, "Work").await;
    let todo = column_id(&store.snapshot().columns, "To Do");
    store.create_card(&todo, "A").await.unwrap();
    store.create_card(&todo, "B").await.unwrap();
    let before = store.snapshot().columns;

    let handle = store.move_card(&todo, &todo, 1, 1).expect("applied");
    handle.settled().await.unwrap();

    assert_eq!(store.snapshot().columns, before);
    assert_eq!(store.snapshot().error, None);
}

#[tokio::test]
async fn test_move_from_unknown_column_is_rejected() {
    let (store, slot) = offline_store();
    open_new_dashboard(&store, "Work").await;
    let todo = column_id(&store.snapshot().columns, "To Do");
    store.create_card(&todo, "A").await.unwrap();
    let before = store.snapshot().columns;
    let stored_before = slot.load().await;

    let handle = store.move_card(&ColumnId::new("missing"), &todo, 0, 0);

    assert!(handle.is_none());
    let state = store.snapshot();
    assert_eq!(state.columns, before);
    assert!(state.error.is_some_and(|e| !e.is_empty()));
    assert_eq!(slot.load().await, stored_before);
}

#[tokio::test]
async fn test_move_persists_through_fallback() {
    let (store, slot) = offline_store();
    let dashboard = open_new_dashboard(&store, "Work").await;
    let todo = column_id(&store.snapshot().columns, "To Do");
    let done = column_id(&store.snapshot().columns, "Done");
    let card = store.create_card(&todo, "Ship").await.unwrap();

    store
        .move_card(&todo, &done, 0, 0)
        .expect("applied")
        .settled()
        .await
        .unwrap();

    let stored = slot.load().await;
    let stored = stored.dashboard(&dashboard.id).unwrap();
    assert!(stored.column(&todo).unwrap().cards.is_empty());
    assert_eq!(stored.column(&done).unwrap().cards[0].id, card.id);
    let state = store.snapshot();
    assert_eq!(state.column(&done).unwrap().cards[0].id, card.id);
    assert!(state.column(&todo).unwrap().cards.is_empty());
}

#[tokio::test]
async fn test_reorders_keep_orders_dense() {
    let (store, slot) = offline_store();
    let dashboard = open_new_dashboard(&store, "Work").await;
    store.create_column("Review").await.unwrap();
    store.create_column("Blocked").await.unwrap();

    let ids: Vec<ColumnId> = store.snapshot().columns.iter().map(|c| c.id.clone()).collect();
    let permutations = [
        vec![ids[4].clone(), ids[0].clone()],
        vec![ids[2].clone(), ids[3].clone(), ids[1].clone()],
        ids.iter().rev().cloned().collect::<Vec<_>>(),
    ];

    for ordered in permutations {
        store
            .reorder_columns(&ordered)
            .expect("applied")
            .settled()
            .await
            .unwrap();

        let columns = store.snapshot().columns;
        let orders: HashSet<i32> = columns.iter().map(|c| c.order).collect();
        assert_eq!(orders, (0..columns.len() as i32).collect::<HashSet<_>>());
        let listed: Vec<&ColumnId> = columns.iter().take(ordered.len()).map(|c| &c.id).collect();
        assert_eq!(listed, ordered.iter().collect::<Vec<_>>());

        let stored = slot.load().await;
        assert_eq!(stored.dashboard(&dashboard.id).unwrap().columns, columns);
    }
}

#[tokio::test]
async fn test_column_created_after_delete_takes_next_order() {
    let (store, _) = offline_store();
    open_new_dashboard(&store, "Work").await;
    let todo = column_id(&store.snapshot().columns, "To Do");

    store.delete_column(&todo);
    let review = store.create_column("Review").await.unwrap();

    let columns = store.snapshot().columns;
    let orders: Vec<i32> = columns.iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(columns[2].id, review.id);
    assert_eq!(review.order, 2);
}

#[tokio::test]
async fn test_duplicate_reorder_ids_are_rejected() {
    let (store, _) = offline_store();
    open_new_dashboard(&store, "Work").await;
    let before = store.snapshot().columns;
    let first = before[0].id.clone();

    assert!(store.reorder_columns(&[first.clone(), first]).is_none());
    assert_eq!(store.snapshot().columns, before);
    assert!(store
        .snapshot()
        .error
        .is_some_and(|e| e.starts_with("Validation error")));
}

/// Card created offline, then the local slot is wiped so the move fails on
/// both tiers and must be reverted.
#[tokio::test]
async fn test_move_reverts_when_both_tiers_fail() {
    let (store, slot) = offline_store();
    open_new_dashboard(&store, "Sprint").await;
    let todo = column_id(&store.snapshot().columns, "To Do");
    let done = column_id(&store.snapshot().columns, "Done");
    let card = store.create_card(&todo, "Write spec").await.unwrap();
    assert_eq!(card.column_id, todo);
    let before = store.snapshot().columns;

    slot.clear().await;
    let handle = store.move_card(&todo, &done, 0, 0).expect("applied");
    assert_eq!(
        store.snapshot().column(&done).unwrap().cards[0].id,
        card.id
    );

    let outcome = handle.settled().await;

    assert!(outcome.is_err());
    let state = store.snapshot();
    assert_eq!(state.columns, before);
    assert_eq!(state.column(&todo).unwrap().cards[0].id, card.id);
    assert!(state.column(&done).unwrap().cards.is_empty());
    assert!(state.error.is_some_and(|e| e.starts_with("Not found")));
}

#[tokio::test]
async fn test_file_slot_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let build = || {
        let slot = SlotStore::new(FileMedium::new(dir.path()));
        let executor = SyncExecutor::new(common::UnreachableRemote, LocalBackend::new(slot, OWNER));
        BoardStore::new(Arc::new(executor), OWNER)
    };

    let dashboard_id = {
        let store = build();
        let dashboard = open_new_dashboard(&store, "Persistent").await;
        let todo = column_id(&store.snapshot().columns, "To Do");
        store.create_card(&todo, "Remember me").await.unwrap();
        dashboard.id
    };

    let store = build();
    store.select_dashboard(&dashboard_id).await;
    let state = store.snapshot();
    assert_eq!(state.error, None);
    let todo = column_id(&state.columns, "To Do");
    assert_eq!(state.column(&todo).unwrap().cards[0].title, "Remember me");
}

#[tokio::test]
async fn test_http_errors_fall_back_to_local() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let gateway =
        RemoteBoardGateway::new(&format!("{}/api", server.uri()), Duration::from_secs(2)).unwrap();
    let slot = Arc::new(SlotStore::new(kanban_persistence::MemoryMedium::new()));
    let executor = SyncExecutor::new(gateway, LocalBackend::new(Arc::clone(&slot), OWNER));

    let dashboards = executor.get_dashboards().await.unwrap();
    assert_eq!(dashboards.len(), 1);
    let created = executor.create_dashboard("Ops", OWNER).await.unwrap();
    assert_eq!(slot.load().await.dashboards.len(), 2);
    assert!(slot.load().await.dashboard(&created.id).is_some());
    assert!(!server.received_requests().await.unwrap().is_empty());
}
