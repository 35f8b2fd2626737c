//! Domain models stored in the graph

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user — a `:User` node in Neo4j.
///
/// `id` is an application-level UUID, independent of Neo4j's internal
/// node id (which is not stable across store migrations).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Secondary lookup key; unique (enforced by constraint + write-time check)
    pub email: String,
    /// Bcrypt hash. Never serialized into API responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Properties for a user about to be created.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Whether one user follows another, from an explicit edge-existence
/// check (never inferred from a truthy relationship count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowStatus {
    Following,
    NotFollowing,
}

impl FollowStatus {
    pub fn from_edge_exists(exists: bool) -> Self {
        if exists {
            FollowStatus::Following
        } else {
            FollowStatus::NotFollowing
        }
    }
}

/// All other users, split by whether the subject follows them.
///
/// The subject is never present in either list. Each list keeps the
/// backend's row order; no sorting is applied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FollowPartition {
    pub following: Vec<User>,
    pub others: Vec<User>,
}

impl FollowPartition {
    /// Route `user` into the matching bucket.
    pub fn push(&mut self, user: User, status: FollowStatus) {
        match status {
            FollowStatus::Following => self.following.push(user),
            FollowStatus::NotFollowing => self.others.push(user),
        }
    }
}
