use hexframe::{ItemId, migration::ContainerCollapse};

use crate::helpers::*;

#[tokio::test]
async fn test_dry_run_plans_without_writing() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(
            store,
            vec![
                user_root(1, "1"),
                item(2, "1,0:3", Some(1)),
                item(3, "1,0:3,0", Some(2)),
                item(4, "1,0:3,0,5", Some(3)),
                item(5, "1,0:3,0,5,1", Some(4)),
            ],
        )
        .await;
        let before = store.all_items().await.unwrap();

        let plan = ContainerCollapse::new()
            .dry_run(store)
            .await
            .expect("Failed to plan");
        assert_eq!(plan.deletions, vec![ItemId::new(3)], "{name}");
        let moves: Vec<(i64, String)> = plan
            .updates
            .iter()
            .map(|u| (u.id.get(), u.to.to_string()))
            .collect();
        assert_eq!(
            moves,
            vec![(4, "1,0:3,-5".to_string()), (5, "1,0:3,-5,1".to_string())],
            "{name}"
        );
        assert_eq!(plan.report.children_reattached, 1, "{name}");
        assert_eq!(plan.report.descendants_readdressed, 1, "{name}");

        assert_eq!(store.all_items().await.unwrap(), before, "{name}");

        // The real run applies exactly what the dry run showed.
        let report = ContainerCollapse::new().run(store).await.unwrap();
        assert_eq!(report, plan.report, "{name}");
    }
}

#[tokio::test]
async fn test_dry_run_on_clean_store_is_empty() {
    for (name, store) in local_stores().await {
        let store = store.as_ref();
        insert_all(store, vec![user_root(1, "1"), item(2, "1,0:-2", Some(1))]).await;

        let plan = ContainerCollapse::new().dry_run(store).await.unwrap();
        assert!(plan.is_empty(), "{name}");
        assert!(plan.report.is_noop(), "{name}");
    }
}
