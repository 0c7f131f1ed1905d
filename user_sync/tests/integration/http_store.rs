//! HttpUserStore against the mock backend

use user_sync::{
    HttpUserStore, NewUserRecord, StoreError, SubscriptionTier, SyncConfig, UserStore, UserUpdate,
};

use crate::common::MockStoreServer;

fn new_user(username: &str, email: &str, external_id: &str) -> NewUserRecord {
    NewUserRecord {
        username: username.to_string(),
        email: email.to_string(),
        password: "idp_managed_placeholder".to_string(),
        confirmed: true,
        blocked: false,
        role: 1,
        external_id: external_id.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        image_url: String::new(),
        subscription_tier: SubscriptionTier::Free,
    }
}

#[tokio::test]
async fn test_lookups_return_first_match_or_none() {
    let server = MockStoreServer::start().await;
    let id = server.seed_user("jane", "jane@example.com", Some("user_2jane"));
    let store = HttpUserStore::new(&server.config()).unwrap();

    let by_external = store.find_by_external_id("user_2jane").await.unwrap();
    assert_eq!(by_external.map(|u| u.id), Some(id));

    let by_email = store.find_by_email("jane@example.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(id));

    assert!(store.find_by_external_id("user_other").await.unwrap().is_none());
    assert!(store.find_by_email("other@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_authenticated_role_lookup() {
    let server = MockStoreServer::start().await;
    let store = HttpUserStore::new(&server.config()).unwrap();

    let role = store.authenticated_role().await.unwrap().unwrap();
    assert_eq!(role.id, 1);
    assert!(role.is_authenticated());

    server
        .data()
        .roles
        .retain(|r| r["type"] != "authenticated");
    assert!(store.authenticated_role().await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_then_conflict() {
    let server = MockStoreServer::start().await;
    let store = HttpUserStore::new(&server.config()).unwrap();

    let created = store
        .create_user(&new_user("jane", "jane@example.com", "user_2jane"))
        .await
        .unwrap();
    assert_eq!(created.external_id.as_deref(), Some("user_2jane"));
    assert_eq!(created.document_id.as_deref(), Some("doc1"));

    let conflict = store
        .create_user(&new_user("jane2", "jane@example.com", "user_other"))
        .await;
    assert_eq!(conflict.unwrap_err(), StoreError::EmailTaken);

    let username_clash = store
        .create_user(&new_user("jane", "jane2@example.com", "user_other"))
        .await;
    assert_eq!(
        username_clash.unwrap_err(),
        StoreError::Status {
            status: 400,
            message: "Username already taken".to_string()
        }
    );
}

#[tokio::test]
async fn test_update_sends_only_set_fields() {
    let server = MockStoreServer::start().await;
    let id = server.seed_user("jane", "jane@example.com", Some("user_2jane"));
    let store = HttpUserStore::new(&server.config()).unwrap();

    let updated = store
        .update_user(id, &UserUpdate::tier(SubscriptionTier::Pro))
        .await
        .unwrap();

    assert_eq!(updated.subscription_tier, Some(SubscriptionTier::Pro));
    assert_eq!(updated.external_id.as_deref(), Some("user_2jane"));
    assert_eq!(updated.username, "jane");
}

#[tokio::test]
async fn test_update_missing_user_is_status_error() {
    let server = MockStoreServer::start().await;
    let store = HttpUserStore::new(&server.config()).unwrap();

    let result = store
        .update_user(404, &UserUpdate::link("user_x", SubscriptionTier::Free))
        .await;
    assert_eq!(
        result.unwrap_err(),
        StoreError::Status {
            status: 404,
            message: "Not Found".to_string()
        }
    );
}

#[tokio::test]
async fn test_bad_token_is_unauthorized() {
    let server = MockStoreServer::start().await;
    let config = SyncConfig::new(&server.base_url, "wrong-token").unwrap();
    let store = HttpUserStore::new(&config).unwrap();

    let result = store.find_by_email("jane@example.com").await;
    assert_eq!(
        result.unwrap_err(),
        StoreError::Status {
            status: 401,
            message: "Missing or invalid credentials".to_string()
        }
    );
    assert_eq!(server.total_requests(), 0);
}
