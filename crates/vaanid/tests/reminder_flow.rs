//! End-to-end reminder lifecycle checks: create, list, scan before and after
//! the deadline, and audit.

use std::sync::Arc;
use tempfile::TempDir;
use vaanid::audit::DeliveredLog;
use vaanid::scanner::DueScanner;
use vaanid::store::ReminderStore;

#[tokio::test]
async fn reminder_lifecycle_from_creation_to_delivery() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ReminderStore::new(dir.path().join("reminders.json")));
    let scanner = DueScanner::new(
        Arc::clone(&store),
        DeliveredLog::new(dir.path().join("delivered.log")),
    );

    // Store starts empty
    assert!(store.load().is_empty());

    let scheduled = "2030-01-01T07:00:00Z".parse().unwrap();
    let id = store.add("u1", "Take medicine", scheduled).await;

    let all = store.load();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].user_id, "u1");
    assert!(!all[0].delivered);

    // Clock before the deadline: nothing due, nothing written
    let before = "2029-12-31T07:00:00Z".parse().unwrap();
    assert!(scanner.run_at(before).await.is_empty());
    assert!(!dir.path().join("delivered.log").exists());

    // Clock past the deadline: the record is promoted exactly once
    let after = "2030-01-01T07:00:01Z".parse().unwrap();
    let due = scanner.run_at(after).await;
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, id);
    assert!(due[0].delivered);
    assert!(due[0].delivered_at.is_some());

    // The flip is persisted
    assert!(store.load()[0].delivered);

    // A second scan re-reports nothing
    assert!(scanner.run_at(after).await.is_empty());

    // Exactly one audit line, carrying the delivered record
    let log = DeliveredLog::new(dir.path().join("delivered.log"));
    let lines = log.read_lines().await.unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(&id));
    assert!(lines[0].contains("Take medicine"));
}

#[tokio::test]
async fn delivered_flag_is_one_way() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ReminderStore::new(dir.path().join("reminders.json")));
    let scanner = DueScanner::new(
        Arc::clone(&store),
        DeliveredLog::new(dir.path().join("delivered.log")),
    );

    store
        .add("u1", "old", "2030-01-01T07:00:00Z".parse().unwrap())
        .await;

    let after = "2030-02-01T00:00:00Z".parse().unwrap();
    assert_eq!(scanner.run_at(after).await.len(), 1);

    // Adding a second reminder must not disturb the delivered one
    store
        .add("u1", "new", "2031-01-01T07:00:00Z".parse().unwrap())
        .await;

    let all = store.load();
    let old = all.iter().find(|r| r.title == "old").unwrap();
    assert!(old.delivered);
    assert!(old.delivered_at.is_some());
}
