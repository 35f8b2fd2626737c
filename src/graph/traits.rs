//! GraphStore trait definition
//!
//! The abstract interface over the graph backend. `Neo4jClient`
//! implements it for production; the test suite uses an in-memory
//! mock, so handlers are exercised without a running Neo4j.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::models::{FollowPartition, NewUser, User};

/// Abstract interface for all graph database operations.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Create a new user (fails if the email is taken)
    async fn create_user(&self, new_user: &NewUser) -> Result<User>;

    /// Get a user by UUID (`None` when no such node exists)
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Get a user by email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// List all users
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Overwrite a user's name
    async fn rename_user(&self, id: Uuid, name: &str) -> Result<()>;

    /// Delete a user and all incident FOLLOWS edges
    async fn delete_user(&self, id: Uuid) -> Result<()>;

    /// Create a directed FOLLOWS edge (idempotent per ordered pair)
    async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()>;

    /// Delete the directed FOLLOWS edge; no-op if absent
    async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()>;

    /// Partition all other users by follow status relative to `id`
    async fn following_and_others(&self, id: Uuid) -> Result<FollowPartition>;
}
