//! Neo4j client for the social graph
//!
//! Every operation is one parameterized Cypher round trip. There is no
//! retry layer and no cross-call state; backend errors surface to the
//! caller with context attached.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use neo4rs::{query, Graph, Query};
use std::sync::Arc;
use uuid::Uuid;

use super::models::{FollowPartition, FollowStatus, NewUser, User};

/// Client owning the connection to the Neo4j backend.
///
/// Constructed explicitly and injected where needed (no process-wide
/// singleton); the driver manages its own connection pool.
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Connect to Neo4j and initialize the schema.
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .context("Failed to connect to Neo4j")?;

        let client = Self {
            graph: Arc::new(graph),
        };

        client.init_schema().await?;

        Ok(client)
    }

    /// Create uniqueness constraints and indexes.
    ///
    /// Email uniqueness is also checked at write time in `create_user`;
    /// the constraint backs that check against concurrent writers.
    async fn init_schema(&self) -> Result<()> {
        let constraints = [
            "CREATE CONSTRAINT user_id IF NOT EXISTS FOR (u:User) REQUIRE u.id IS UNIQUE",
            "CREATE CONSTRAINT user_email IF NOT EXISTS FOR (u:User) REQUIRE u.email IS UNIQUE",
        ];
        let indexes = ["CREATE INDEX user_name IF NOT EXISTS FOR (u:User) ON (u.name)"];

        for constraint in constraints {
            if let Err(e) = self.graph.run(query(constraint)).await {
                tracing::warn!("Constraint may already exist: {}", e);
            }
        }

        for index in indexes {
            if let Err(e) = self.graph.run(query(index)).await {
                tracing::warn!("Index may already exist: {}", e);
            }
        }

        Ok(())
    }

    /// Execute a parameterized Cypher query and collect all rows.
    pub(crate) async fn execute(&self, q: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(q).await?;
        let mut rows = Vec::new();
        while let Some(row) = result.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    // ========================================================================
    // User operations
    // ========================================================================

    /// Create a new user node.
    ///
    /// Assigns a fresh UUID; fails if the email is already taken.
    pub async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        if self.get_user_by_email(&new_user.email).await?.is_some() {
            bail!("email already registered: {}", new_user.email);
        }

        let q = query(
            r#"
            CREATE (u:User {
                id: $id,
                name: $name,
                email: $email,
                password_hash: $password_hash,
                created_at: $created_at
            })
            RETURN u
            "#,
        )
        .param("id", Uuid::new_v4().to_string())
        .param("name", new_user.name.clone())
        .param("email", new_user.email.clone())
        .param("password_hash", new_user.password_hash.clone())
        .param("created_at", Utc::now().to_rfc3339());

        let mut result = self.graph.execute(q).await?;
        if let Some(row) = result.next().await? {
            let node: neo4rs::Node = row.get("u")?;
            node_to_user(&node)
        } else {
            bail!("create_user: no row returned")
        }
    }

    /// Get a user by UUID. `None` on empty result set; transport
    /// failures are errors, never conflated with "not found".
    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let q = query("MATCH (u:User {id: $id}) RETURN u").param("id", id.to_string());

        let mut result = self.graph.execute(q).await?;
        if let Some(row) = result.next().await? {
            let node: neo4rs::Node = row.get("u")?;
            Ok(Some(node_to_user(&node)?))
        } else {
            Ok(None)
        }
    }

    /// Get a user by email (the secondary lookup key).
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let q = query("MATCH (u:User {email: $email}) RETURN u").param("email", email);

        let mut result = self.graph.execute(q).await?;
        if let Some(row) = result.next().await? {
            let node: neo4rs::Node = row.get("u")?;
            Ok(Some(node_to_user(&node)?))
        } else {
            Ok(None)
        }
    }

    /// List every user node.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let q = query("MATCH (u:User) RETURN u");

        let mut result = self.graph.execute(q).await?;
        let mut users = Vec::new();
        while let Some(row) = result.next().await? {
            let node: neo4rs::Node = row.get("u")?;
            users.push(node_to_user(&node)?);
        }
        Ok(users)
    }

    /// Overwrite a user's name. Other fields are untouched.
    pub async fn rename_user(&self, id: Uuid, name: &str) -> Result<()> {
        let q = query(
            r#"
            MATCH (u:User {id: $id})
            SET u.name = $name
            RETURN u.id AS id
            "#,
        )
        .param("id", id.to_string())
        .param("name", name);

        let rows = self.execute(q).await?;
        if rows.is_empty() {
            bail!("user not found: {}", id);
        }
        Ok(())
    }

    /// Delete a user and any FOLLOWS edges touching it, in either
    /// direction, in one query.
    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        let q = query(
            r#"
            MATCH (u:User {id: $id})
            DETACH DELETE u
            RETURN 1 AS deleted
            "#,
        )
        .param("id", id.to_string());

        let rows = self.execute(q).await?;
        if rows.is_empty() {
            bail!("user not found: {}", id);
        }
        Ok(())
    }

    // ========================================================================
    // Follow operations
    // ========================================================================

    /// Create a directed FOLLOWS edge.
    ///
    /// MERGE keeps the edge unique per ordered pair; self-follow is
    /// rejected before touching the backend.
    pub async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        if follower_id == followee_id {
            bail!("a user cannot follow themselves");
        }

        let q = query(
            r#"
            MATCH (a:User {id: $follower}), (b:User {id: $followee})
            MERGE (a)-[:FOLLOWS]->(b)
            RETURN 1 AS linked
            "#,
        )
        .param("follower", follower_id.to_string())
        .param("followee", followee_id.to_string());

        let rows = self.execute(q).await?;
        if rows.is_empty() {
            bail!("user not found: {} or {}", follower_id, followee_id);
        }
        Ok(())
    }

    /// Delete the directed FOLLOWS edge if present; no-op otherwise.
    pub async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        let q = query(
            r#"
            MATCH (a:User {id: $follower})-[r:FOLLOWS]->(b:User {id: $followee})
            DELETE r
            "#,
        )
        .param("follower", follower_id.to_string())
        .param("followee", followee_id.to_string());

        self.graph.run(q).await?;
        Ok(())
    }

    /// Partition every other user by whether `id` follows them.
    ///
    /// One query joins all other users with an explicit edge-existence
    /// check; the subject is excluded in the query itself.
    pub async fn following_and_others(&self, id: Uuid) -> Result<FollowPartition> {
        let q = query(
            r#"
            MATCH (me:User {id: $id})
            MATCH (other:User)
            WHERE other.id <> me.id
            RETURN other, EXISTS { (me)-[:FOLLOWS]->(other) } AS follows
            "#,
        )
        .param("id", id.to_string());

        let mut result = self.graph.execute(q).await?;
        let mut partition = FollowPartition::default();
        while let Some(row) = result.next().await? {
            let node: neo4rs::Node = row.get("other")?;
            let follows: bool = row.get("follows")?;
            partition.push(node_to_user(&node)?, FollowStatus::from_edge_exists(follows));
        }
        Ok(partition)
    }
}

/// Parse a Neo4j node into a `User`.
fn node_to_user(node: &neo4rs::Node) -> Result<User> {
    Ok(User {
        id: node
            .get::<String>("id")?
            .parse()
            .context("User node has a malformed id")?,
        name: node.get("name")?,
        email: node.get("email")?,
        password_hash: node.get("password_hash")?,
        created_at: node
            .get::<String>("created_at")?
            .parse()
            .unwrap_or_else(|_| Utc::now()),
    })
}
