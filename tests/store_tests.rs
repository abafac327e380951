use outpass::db::{NewPass, Store, mint_token};

async fn memory_store() -> Store {
    Store::new("sqlite::memory:")
        .await
        .expect("Failed to create store")
}

fn sample_pass(teacher: &str) -> NewPass {
    NewPass {
        name: "Kim".to_string(),
        issue_date: "2024-04-02 09:15:00".to_string(),
        reason: "Clinic".to_string(),
        expiry_date: "2024-05-01".to_string(),
        teacher: teacher.to_string(),
        ban: "3-2".to_string(),
        unique_id: mint_token(),
    }
}

#[tokio::test]
async fn test_register_once_per_username() {
    let store = memory_store().await;

    let first = store.register_user("alice", "pw123").await.unwrap();
    assert!(first.is_some());
    assert_eq!(first.unwrap().username, "alice");

    let second = store.register_user("alice", "different").await.unwrap();
    assert!(second.is_none());

    let other = store.register_user("bob", "pw123").await.unwrap();
    assert!(other.is_some());
}

#[tokio::test]
async fn test_verify_matches_registered_credentials() {
    let store = memory_store().await;
    store.register_user("alice", "pw123").await.unwrap();

    let ok = store.verify_user("alice", "pw123").await.unwrap();
    assert_eq!(ok.unwrap().username, "alice");

    assert!(store.verify_user("alice", "wrong").await.unwrap().is_none());
    assert!(store.verify_user("nobody", "pw123").await.unwrap().is_none());
}

#[tokio::test]
async fn test_plaintext_password_is_never_stored() {
    let store = memory_store().await;
    store.register_user("alice", "pw123").await.unwrap();

    use outpass::entities::users;
    use sea_orm::EntityTrait;

    let row = users::Entity::find().one(&store.conn).await.unwrap().unwrap();
    assert!(!row.password_hash.contains("pw123"));
    assert!(row.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_insert_and_find_by_token_roundtrip() {
    let store = memory_store().await;

    let pass = sample_pass("alice");
    let token = pass.unique_id.clone();
    let stored = store.insert_pass(pass).await.unwrap();
    assert!(stored.id > 0);

    let found = store.find_pass_by_token(&token).await.unwrap().unwrap();
    assert_eq!(found.name, "Kim");
    assert_eq!(found.reason, "Clinic");
    assert_eq!(found.expiry_date, "2024-05-01");
    assert_eq!(found.ban, "3-2");
    assert_eq!(found.teacher, "alice");
    assert_eq!(found.unique_id, token);
}

#[tokio::test]
async fn test_find_unknown_token_returns_none() {
    let store = memory_store().await;
    store.insert_pass(sample_pass("alice")).await.unwrap();

    let missing = store.find_pass_by_token(&mint_token()).await.unwrap();
    assert!(missing.is_none());

    // Exact match only; a token prefix is not enough.
    let pass = sample_pass("alice");
    let token = pass.unique_id.clone();
    store.insert_pass(pass).await.unwrap();
    let prefix = &token[..16];
    assert!(store.find_pass_by_token(prefix).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_token_insert_is_rejected() {
    let store = memory_store().await;

    let first = sample_pass("alice");
    let mut second = sample_pass("bob");
    second.unique_id = first.unique_id.clone();

    store.insert_pass(first).await.unwrap();
    assert!(store.insert_pass(second).await.is_err());
}

#[tokio::test]
async fn test_ping() {
    let store = memory_store().await;
    store.ping().await.unwrap();
}
