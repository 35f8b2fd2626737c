//! In-memory mock implementation of GraphStore for testing.
//!
//! Users live in a `RwLock<HashMap>`, FOLLOWS edges in a
//! `RwLock<HashSet>` of ordered id pairs. Semantics mirror the Cypher
//! queries in `client.rs`. Conditionally compiled with `#[cfg(test)]`.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{FollowPartition, FollowStatus, NewUser, User};
use super::traits::GraphStore;

/// In-memory mock implementation of GraphStore for testing.
pub struct MockGraphStore {
    pub users: RwLock<HashMap<Uuid, User>>,
    /// Directed edges as (follower, followee) pairs. A set, so the
    /// MERGE dedup semantics of the real backend hold for free.
    pub follows: RwLock<HashSet<(Uuid, Uuid)>>,
}

impl MockGraphStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            follows: RwLock::new(HashSet::new()),
        }
    }
}

impl Default for MockGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            bail!("email already registered: {}", new_user.email);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn rename_user(&self, id: Uuid, name: &str) -> Result<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.name = name.to_string();
                Ok(())
            }
            None => bail!("user not found: {}", id),
        }
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        let mut users = self.users.write().await;
        if users.remove(&id).is_none() {
            bail!("user not found: {}", id);
        }
        self.follows
            .write()
            .await
            .retain(|&(a, b)| a != id && b != id);
        Ok(())
    }

    async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        if follower_id == followee_id {
            bail!("a user cannot follow themselves");
        }
        let users = self.users.read().await;
        if !users.contains_key(&follower_id) || !users.contains_key(&followee_id) {
            bail!("user not found: {} or {}", follower_id, followee_id);
        }
        self.follows.write().await.insert((follower_id, followee_id));
        Ok(())
    }

    async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        self.follows.write().await.remove(&(follower_id, followee_id));
        Ok(())
    }

    async fn following_and_others(&self, id: Uuid) -> Result<FollowPartition> {
        let users = self.users.read().await;
        let mut partition = FollowPartition::default();

        // Unknown subject matches nothing, same as the Cypher MATCH.
        if !users.contains_key(&id) {
            return Ok(partition);
        }

        let follows = self.follows.read().await;
        for user in users.values().filter(|u| u.id != id) {
            let status = FollowStatus::from_edge_exists(follows.contains(&(id, user.id)));
            partition.push(user.clone(), status);
        }
        Ok(partition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name),
            password_hash: "$2b$08$xxxxxxxxxxxxxxxxxxxxxx".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let store = MockGraphStore::new();
        let created = store.create_user(&new_user("alice")).await.unwrap();

        let fetched = store.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "alice");
        assert_eq!(fetched.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MockGraphStore::new();
        store.create_user(&new_user("alice")).await.unwrap();

        let result = store.create_user(&new_user("alice")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rename_preserves_other_fields() {
        let store = MockGraphStore::new();
        let alice = store.create_user(&new_user("alice")).await.unwrap();

        store.rename_user(alice.id, "alicia").await.unwrap();

        let fetched = store.get_user(alice.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "alicia");
        assert_eq!(fetched.email, alice.email);
        assert_eq!(fetched.password_hash, alice.password_hash);
    }

    #[tokio::test]
    async fn test_follow_is_directional() {
        let store = MockGraphStore::new();
        let alice = store.create_user(&new_user("alice")).await.unwrap();
        let bob = store.create_user(&new_user("bob")).await.unwrap();

        store.follow(bob.id, alice.id).await.unwrap();

        let bobs = store.following_and_others(bob.id).await.unwrap();
        assert!(bobs.following.iter().any(|u| u.id == alice.id));

        let alices = store.following_and_others(alice.id).await.unwrap();
        assert!(alices.following.is_empty());
        assert!(alices.others.iter().any(|u| u.id == bob.id));
    }

    #[tokio::test]
    async fn test_self_follow_rejected() {
        let store = MockGraphStore::new();
        let alice = store.create_user(&new_user("alice")).await.unwrap();

        assert!(store.follow(alice.id, alice.id).await.is_err());
    }

    #[tokio::test]
    async fn test_unfollow_twice_is_noop() {
        let store = MockGraphStore::new();
        let alice = store.create_user(&new_user("alice")).await.unwrap();
        let bob = store.create_user(&new_user("bob")).await.unwrap();

        store.follow(alice.id, bob.id).await.unwrap();
        store.unfollow(alice.id, bob.id).await.unwrap();
        store.unfollow(alice.id, bob.id).await.unwrap();

        let partition = store.following_and_others(alice.id).await.unwrap();
        assert!(partition.following.is_empty());
        assert_eq!(partition.others.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_edges() {
        let store = MockGraphStore::new();
        let alice = store.create_user(&new_user("alice")).await.unwrap();
        let bob = store.create_user(&new_user("bob")).await.unwrap();
        store.follow(alice.id, bob.id).await.unwrap();
        store.follow(bob.id, alice.id).await.unwrap();

        store.delete_user(bob.id).await.unwrap();

        assert!(store.get_user(bob.id).await.unwrap().is_none());
        assert!(store.list_users().await.unwrap().iter().all(|u| u.id != bob.id));
        assert!(store.follows.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_partition_excludes_subject() {
        let store = MockGraphStore::new();
        let alice = store.create_user(&new_user("alice")).await.unwrap();
        store.create_user(&new_user("bob")).await.unwrap();

        let partition = store.following_and_others(alice.id).await.unwrap();
        assert!(partition.following.iter().all(|u| u.id != alice.id));
        assert!(partition.others.iter().all(|u| u.id != alice.id));
    }
}
