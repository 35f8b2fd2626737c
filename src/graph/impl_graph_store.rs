//! `GraphStore` implementation for `Neo4jClient`.
//!
//! Every method delegates to the corresponding inherent method.

use async_trait::async_trait;
use uuid::Uuid;

use super::client::Neo4jClient;
use super::models::{FollowPartition, NewUser, User};
use super::traits::GraphStore;

#[async_trait]
impl GraphStore for Neo4jClient {
    async fn create_user(&self, new_user: &NewUser) -> anyhow::Result<User> {
        self.create_user(new_user).await
    }

    async fn get_user(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.get_user(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.get_user_by_email(email).await
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        self.list_users().await
    }

    async fn rename_user(&self, id: Uuid, name: &str) -> anyhow::Result<()> {
        self.rename_user(id, name).await
    }

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<()> {
        self.delete_user(id).await
    }

    async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> anyhow::Result<()> {
        self.follow(follower_id, followee_id).await
    }

    async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> anyhow::Result<()> {
        self.unfollow(follower_id, followee_id).await
    }

    async fn following_and_others(&self, id: Uuid) -> anyhow::Result<FollowPartition> {
        self.following_and_others(id).await
    }
}
