use super::*;
use crate::model::ChatMessage;
use serde_json::{Map, json};

fn new_project(name: &str) -> NewProject {
    NewProject { name: name.into(), messages: vec![], data: Map::new() }
}

// =============================================================================
// MemoryUserStore
// =============================================================================

#[tokio::test]
async fn create_and_find_user() {
    let store = MemoryUserStore::new();
    let user = store.create_user("a@b.co", "hash").await.unwrap();

    let by_email = store.find_by_email("a@b.co").await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
    let by_id = store.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "a@b.co");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let store = MemoryUserStore::new();
    store.create_user("a@b.co", "hash").await.unwrap();
    let err = store.create_user("a@b.co", "other").await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail(_)));
}

#[tokio::test]
async fn unknown_user_is_none() {
    let store = MemoryUserStore::new();
    assert!(store.find_by_email("nobody@b.co").await.unwrap().is_none());
    assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

// =============================================================================
// MemoryProjectStore
// =============================================================================

#[tokio::test]
async fn create_project_keeps_messages_and_data() {
    let store = MemoryProjectStore::new();
    let owner = Uuid::new_v4();
    let mut data = Map::new();
    data.insert("/App.jsx".into(), json!({"type": "file", "content": "x"}));
    let project = NewProject { name: "p".into(), messages: vec![ChatMessage::new("user", "Hello")], data };

    let record = store.create_project(owner, project).await.unwrap();
    assert_eq!(record.user_id, owner);
    assert_eq!(record.messages[0].text(), Some("Hello"));
    assert!(record.data.contains_key("/App.jsx"));
}

#[tokio::test]
async fn list_is_most_recent_first_and_scoped_to_owner() {
    let store = MemoryProjectStore::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    store.create_project(owner, new_project("older")).await.unwrap();
    store.create_project(stranger, new_project("theirs")).await.unwrap();
    store.create_project(owner, new_project("newer")).await.unwrap();

    let names: Vec<String> = store
        .list_projects(owner)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["newer", "older"]);
}

#[tokio::test]
async fn get_project_hides_other_owners() {
    let store = MemoryProjectStore::new();
    let owner = Uuid::new_v4();
    let record = store.create_project(owner, new_project("mine")).await.unwrap();

    assert!(store.get_project(owner, record.id).await.unwrap().is_some());
    assert!(store.get_project(Uuid::new_v4(), record.id).await.unwrap().is_none());
}
