//! Test helper factories and mock state builders
#![allow(dead_code)]

use crate::api::handlers::{ApiState, ServerState};
use crate::auth::password::hash_password;
use crate::graph::mock::MockGraphStore;
use crate::graph::{GraphStore, NewUser, User};
use crate::AuthConfig;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-secret-key-minimum-32-chars!!";

/// Auth config with the shared test secret
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiry_secs: 3600,
        allow_registration: true,
    }
}

/// Server state backed by an empty in-memory store
pub fn mock_server_state(auth_config: Option<AuthConfig>) -> ApiState {
    mock_server_state_with_store(Arc::new(MockGraphStore::new()), auth_config)
}

/// Server state wrapping a pre-seeded store
pub fn mock_server_state_with_store(
    store: Arc<dyn GraphStore>,
    auth_config: Option<AuthConfig>,
) -> ApiState {
    Arc::new(ServerState { store, auth_config })
}

/// A store with two users where alice follows bob.
pub async fn seeded_store() -> (Arc<dyn GraphStore>, User, User) {
    let store = MockGraphStore::new();

    let alice = store
        .create_user(&NewUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: hash_password("alice-password").unwrap(),
        })
        .await
        .unwrap();

    let bob = store
        .create_user(&NewUser {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            password_hash: hash_password("bob-password").unwrap(),
        })
        .await
        .unwrap();

    store.follow(alice.id, bob.id).await.unwrap();

    (Arc::new(store), alice, bob)
}
