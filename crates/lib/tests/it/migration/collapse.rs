use hexframe::{
    ItemId,
    backend::NodeStore,
    migration::{ContainerCollapse, MigrationError, MigrationReport},
};

use crate::helpers::*;

async fn collapse(store: &dyn NodeStore) -> MigrationReport {
    ContainerCollapse::new()
        .run(store)
        .await
        .expect("Failed to run container collapse")
}

#[tokio::test]
async fn test_children_move_to_composed_slots() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![
                user_root(1, "1"),
                item(2, "1,0:1", Some(1)),
                item(3, "1,0:1,0", Some(2)),
                item(4, "1,0:1,0,1", Some(3)),
                item(5, "1,0:1,0,3", Some(3)),
            ],
        )
        .await;
        let before = fetch(store, 4).await;

        let report = collapse(store).await;
        assert_eq!(report.containers_removed, 1, "{name}");
        assert_eq!(report.children_reattached, 2, "{name}");

        assert_missing(store, 3).await;
        let moved = fetch(store, 4).await;
        assert_eq!(moved.coords, coord("1,0:1,-1"), "{name}");
        assert_eq!(moved.parent_id, Some(ItemId::new(2)), "{name}");
        assert_eq!(moved.content, before.content, "{name}");
        assert_eq!(moved.item_type, before.item_type, "{name}");
        assert_eq!(
            moved.created_at.timestamp_millis(),
            before.created_at.timestamp_millis(),
            "{name}"
        );
        assert_eq!(
            moved.updated_at.timestamp_millis(),
            before.updated_at.timestamp_millis(),
            "{name}"
        );
        assert_eq!(fetch(store, 5).await.coords, coord("1,0:1,-3"), "{name}");
    }
}

#[tokio::test]
async fn test_grandchildren_keep_their_parent() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![
                user_root(1, "1"),
                item(2, "1,0:1", Some(1)),
                item(3, "1,0:1,0", Some(2)),
                item(4, "1,0:1,0,1", Some(3)),
                item(5, "1,0:1,0,1,2", Some(4)),
                item(6, "1,0:1,0,1,2,-5", Some(5)),
            ],
        )
        .await;

        let report = collapse(store).await;
        assert_eq!(report.descendants_readdressed, 2, "{name}");

        let grandchild = fetch(store, 5).await;
        assert_eq!(grandchild.coords, coord("1,0:1,-1,2"), "{name}");
        assert_eq!(grandchild.parent_id, Some(ItemId::new(4)), "{name}");

        let composed_below = fetch(store, 6).await;
        assert_eq!(composed_below.coords, coord("1,0:1,-1,2,-5"), "{name}");
        assert_eq!(composed_below.parent_id, Some(ItemId::new(5)), "{name}");
    }
}

#[tokio::test]
async fn test_root_level_container() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![
                user_root(1, "1"),
                item(2, "1,0:0", Some(1)),
                item(3, "1,0:0,1", Some(2)),
                item(4, "1,0:0,6", Some(2)),
            ],
        )
        .await;

        collapse(store).await;

        assert_missing(store, 2).await;
        let first = fetch(store, 3).await;
        assert_eq!(first.coords, coord("1,0:-1"), "{name}");
        assert_eq!(first.parent_id, Some(ItemId::new(1)), "{name}");
        assert_eq!(fetch(store, 4).await.coords, coord("1,0:-6"), "{name}");
    }
}

#[tokio::test]
async fn test_parentless_root_level_container() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![item(2, "1,0:0", None), item(3, "1,0:0,4", Some(2))],
        )
        .await;

        collapse(store).await;

        let moved = fetch(store, 3).await;
        assert_eq!(moved.coords, coord("1,0:-4"), "{name}");
        assert_eq!(moved.parent_id, None, "{name}");
    }
}

#[tokio::test]
async fn test_empty_container_is_deleted() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![
                user_root(1, "1"),
                item(2, "1,0:3", Some(1)),
                item(3, "1,0:3,0", Some(2)),
            ],
        )
        .await;

        let report = collapse(store).await;
        assert_eq!(
            report,
            MigrationReport {
                containers_removed: 1,
                children_reattached: 0,
                descendants_readdressed: 0,
            },
            "{name}"
        );
        assert_missing(store, 3).await;
        assert_eq!(store.all_items().await.unwrap().len(), 2, "{name}");
    }
}

#[tokio::test]
async fn test_multiple_compositions_across_spaces() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![
                user_root(1, "1"),
                item(2, "1,0:2", Some(1)),
                item(3, "1,0:2,0", Some(2)),
                item(4, "1,0:2,0,5", Some(3)),
                item(5, "1,0:6", Some(1)),
                item(6, "1,0:6,0", Some(5)),
                item(7, "1,0:6,0,5", Some(6)),
                user_root(10, "2"),
                item(11, "2,0:0", Some(10)),
                item(12, "2,0:0,3", Some(11)),
            ],
        )
        .await;

        let report = collapse(store).await;
        assert_eq!(report.containers_removed, 3, "{name}");
        assert_eq!(report.children_reattached, 3, "{name}");

        assert_eq!(fetch(store, 4).await.coords, coord("1,0:2,-5"), "{name}");
        assert_eq!(fetch(store, 7).await.coords, coord("1,0:6,-5"), "{name}");
        assert_eq!(fetch(store, 12).await.coords, coord("2,0:-3"), "{name}");
        assert_eq!(fetch(store, 12).await.parent_id, Some(ItemId::new(10)), "{name}");
    }
}

#[tokio::test]
async fn test_nested_containers() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![
                user_root(1, "1"),
                item(2, "1,0:0", Some(1)),
                item(3, "1,0:0,2", Some(2)),
                item(4, "1,0:0,2,0", Some(3)),
                item(5, "1,0:0,2,0,4", Some(4)),
            ],
        )
        .await;

        let report = collapse(store).await;
        assert_eq!(report.containers_removed, 2, "{name}");

        let inner = fetch(store, 5).await;
        assert_eq!(inner.coords, coord("1,0:-2,-4"), "{name}");
        assert_eq!(inner.parent_id, Some(ItemId::new(3)), "{name}");
        assert_eq!(fetch(store, 3).await.coords, coord("1,0:-2"), "{name}");
    }
}

#[tokio::test]
async fn test_second_run_changes_nothing() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![
                user_root(1, "1"),
                item(2, "1,0:4", Some(1)),
                item(3, "1,0:4,0", Some(2)),
                item(4, "1,0:4,0,2", Some(3)),
                item(5, "1,0:4,0,2,2", Some(4)),
            ],
        )
        .await;

        collapse(store).await;
        let after_first = store.all_items().await.unwrap();

        let second = collapse(store).await;
        assert!(second.is_noop(), "{name}");
        assert_eq!(store.all_items().await.unwrap(), after_first, "{name}");
    }
}

#[tokio::test]
async fn test_unrelated_items_are_untouched() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![
                user_root(1, "1"),
                item(2, "1,0:1", Some(1)),
                item(3, "1,0:1,0", Some(2)),
                item(4, "1,0:1,0,3", Some(3)),
                item(5, "1,0:5", Some(1)),
                item(6, "1,0:5,-2", Some(5)),
            ],
        )
        .await;
        let untouched_before = vec![fetch(store, 5).await, fetch(store, 6).await];

        collapse(store).await;

        let untouched_after = vec![fetch(store, 5).await, fetch(store, 6).await];
        for (before, after) in untouched_before.iter().zip(&untouched_after) {
            assert_eq!(before.coords, after.coords, "{name}");
            assert_eq!(before.parent_id, after.parent_id, "{name}");
        }
    }
}

#[tokio::test]
async fn test_failure_leaves_store_unchanged() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![
                user_root(1, "1"),
                // A healthy container that would be collapsed on its own.
                item(2, "1,0:1", Some(1)),
                item(3, "1,0:1,0", Some(2)),
                item(4, "1,0:1,0,6", Some(3)),
                // A broken one: its child sits at a composed step.
                item(5, "1,0:2", Some(1)),
                item(6, "1,0:2,0", Some(5)),
                item(7, "1,0:2,0,-1", Some(6)),
            ],
        )
        .await;
        let before = store.all_items().await.unwrap();

        let err = ContainerCollapse::new()
            .run(store)
            .await
            .expect_err("composed child of a container must abort");
        assert!(
            matches!(
                err,
                hexframe::Error::Migration(MigrationError::UnexpectedChildDirection { .. })
            ),
            "{name}: {err}"
        );

        assert_eq!(store.all_items().await.unwrap(), before, "{name}");
    }
}

#[tokio::test]
async fn test_collision_aborts() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![
                user_root(1, "1"),
                item(2, "1,0:3", Some(1)),
                item(3, "1,0:3,0", Some(2)),
                item(4, "1,0:3,0,1", Some(3)),
                item(5, "1,0:3,-1", Some(2)),
            ],
        )
        .await;
        let before = store.all_items().await.unwrap();

        let err = ContainerCollapse::new()
            .run(store)
            .await
            .expect_err("slot -1 is already taken");
        assert!(err.is_conflict(), "{name}: {err}");
        // The container was deleted before the clash; that delete is undone too.
        assert_eq!(fetch(store, 3).await.coords, coord("1,0:3,0"), "{name}");
        assert_eq!(fetch(store, 4).await.coords, coord("1,0:3,0,1"), "{name}");
        assert_eq!(store.all_items().await.unwrap(), before, "{name}");
    }
}
