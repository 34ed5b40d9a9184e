mod common;

use cadence_core::{SqliteStore, Store, StoreKey, View};
use common::{input, open_controller};
use tempfile::TempDir;

#[tokio::test]
async fn test_session_survives_restart() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let plan_id = {
        let controller = open_controller(&temp_dir).await;
        controller.login("小明").await.unwrap();

        let mut form = input("咖啡廳");
        form.brand_name = "晨光咖啡".to_string();
        let plan = controller.generate_plan(form).await.unwrap();
        assert_eq!(controller.view().await, View::Dashboard);

        assert_eq!(controller.toggle_completion(1, 0).await.unwrap(), Some(true));
        plan.id
    };

    let controller = open_controller(&temp_dir).await;

    assert_eq!(controller.user().await.unwrap().username, "小明");
    assert_eq!(controller.usage().await, 1);
    assert_eq!(controller.form().await.brand_name, "晨光咖啡");

    let history = controller.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, plan_id);
    assert_eq!(history[0].input.industry, "咖啡廳");
    assert_eq!(history[0].weeks.len(), 12);
    assert!(history[0].weeks[1].posts[0].is_completed);
    assert!(!history[0].weeks[1].posts[1].is_completed);

    // the current plan is a view over history and is not restored
    assert_eq!(controller.current_plan().await, None);
    let opened = controller.open_plan(&plan_id).await.unwrap();
    assert_eq!(opened, history[0]);
}

#[tokio::test]
async fn test_logout_survives_restart_and_keeps_history() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    {
        let controller = open_controller(&temp_dir).await;
        controller.login("小明").await.unwrap();
        controller.generate_plan(input("花店")).await.unwrap();
        controller.logout().await.unwrap();
    }

    let controller = open_controller(&temp_dir).await;
    assert_eq!(controller.user().await, None);
    assert_eq!(controller.history().await.len(), 1);
}

#[tokio::test]
async fn test_corrupt_memo_in_sqlite_falls_back() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = SqliteStore::open(temp_dir.path().join("test.db"))
        .await
        .unwrap();
    store
        .save(StoreKey::FormMemo, "{\"industry\": 42}")
        .await
        .unwrap();

    let controller = open_controller(&temp_dir).await;
    assert_eq!(controller.form().await, cadence_core::MarketingInput::default());

    // the bad memo is overwritten on the next form change
    controller.update_form(input("書店")).await.unwrap();
    let reopened = open_controller(&temp_dir).await;
    assert_eq!(reopened.form().await.industry, "書店");
}

#[tokio::test]
async fn test_post_image_is_not_persisted() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let controller = open_controller(&temp_dir).await;
    controller.generate_plan(input("咖啡廳")).await.unwrap();

    let before = controller.history().await;
    let image = controller.generate_post_image(2, 1).await.unwrap();
    assert_eq!(image.bytes().unwrap(), b"\x89PNG".to_vec());

    let reopened = open_controller(&temp_dir).await;
    assert_eq!(reopened.history().await, before);
}
