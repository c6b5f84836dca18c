use hexframe::ItemId;

use crate::helpers::*;

#[tokio::test]
async fn test_transaction_sees_its_own_writes() {
    for (name, store) in local_stores().await {
        insert_all(
            store.as_ref(),
            vec![
                user_root(1, "1"),
                item(2, "1,0:3", Some(1)),
                item(3, "1,0:3,1", Some(2)),
            ],
        )
        .await;

        let mut txn = store.begin().await.expect("Failed to begin");
        txn.update_address(ItemId::new(3), &coord("1,0:3,-1"), Some(ItemId::new(2)))
            .await
            .expect("Failed to update");

        let below = txn
            .descendants_of(&coord("1,0:3"))
            .await
            .expect("Failed to query descendants");
        assert_eq!(below.len(), 1, "{name}");
        assert_eq!(below[0].coords, coord("1,0:3,-1"), "{name}");

        txn.delete(ItemId::new(3)).await.expect("Failed to delete");
        let children = txn.children_of(ItemId::new(2)).await.unwrap();
        assert!(children.is_empty(), "{name}");

        txn.rollback().await.expect("Failed to roll back");
        assert_eq!(fetch(store.as_ref(), 3).await.coords, coord("1,0:3,1"), "{name}");
    }
}

#[tokio::test]
async fn test_containers_are_listed_deepest_first() {
    for (name, store) in local_stores().await {
        insert_all(
            store.as_ref(),
            vec![
                user_root(1, "1"),
                item(2, "1,0:0", Some(1)),
                item(3, "1,0:2", Some(1)),
                item(4, "1,0:2,0", Some(3)),
                item(5, "1,0:2,0,4", Some(4)),
                item(6, "1,0:2,0,4,0", Some(5)),
                item(7, "1,0:1,0", Some(1)),
                item(8, "2,0:0", None),
            ],
        )
        .await;

        let mut txn = store.begin().await.expect("Failed to begin");
        let containers = txn.containers_deepest_first().await.unwrap();
        let ids: Vec<i64> = containers.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![6, 7, 4, 2, 8], "{name}");
        txn.rollback().await.unwrap();
    }
}

#[tokio::test]
async fn test_descendants_stay_in_their_space() {
    for (name, store) in local_stores().await {
        insert_all(
            store.as_ref(),
            vec![
                user_root(1, "1"),
                item(2, "1,0:4", Some(1)),
                item(3, "1,0:4,4", Some(2)),
                user_root(10, "11"),
                item(11, "11,0:4", Some(10)),
                item(12, "11,0:4,4", Some(11)),
                item(13, "1,1:4,4", None),
            ],
        )
        .await;

        let mut txn = store.begin().await.expect("Failed to begin");
        let below = txn.descendants_of(&coord("1,0:4")).await.unwrap();
        let ids: Vec<i64> = below.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![3], "{name}");

        let below_root = txn.descendants_of(&coord("1,0")).await.unwrap();
        let ids: Vec<i64> = below_root.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![2, 3], "{name}");
        txn.rollback().await.unwrap();
    }
}
