use antigravity_core::{
    Category, CoreError, CoreResult, Edge, EdgeId, GraphStore, NewNode, Node, NodeId,
    RelationType,
};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, error};
use uuid::Uuid;

use crate::{PostgresConfig, PostgresConnection};

const NODE_COLUMNS: &str = "id, title, category, ai_summary, steps, tools, materials, \
    common_mistakes, difficulty, time_estimate, cost_estimate, created_at, updated_at";

const EDGE_COLUMNS: &str = "id, from_node_id, to_node_id, relation_type";

/// PostgreSQL implementation of the graph store
#[derive(Clone, Debug)]
pub struct PostgresGraphStore {
    conn: PostgresConnection,
}

impl PostgresGraphStore {
    pub fn new(conn: PostgresConnection) -> Self {
        Self { conn }
    }

    /// Connects, applies migrations if configured, and wraps the pool.
    pub async fn connect(config: &PostgresConfig) -> CoreResult<Self> {
        Ok(Self::new(PostgresConnection::connect(config).await?))
    }

    pub fn connection(&self) -> &PostgresConnection {
        &self.conn
    }
}

fn db_error(context: &str, e: sqlx::Error) -> CoreError {
    error!(error = %e, "{}", context);
    CoreError::store_failure(context, Some(e))
}

/// Escapes LIKE wildcards so the needle matches literally.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn to_uuids(ids: &HashSet<NodeId>) -> Vec<Uuid> {
    ids.iter().map(|id| id.0).collect()
}

fn row_to_node(row: &PgRow) -> CoreResult<Node> {
    let get_err = |e: sqlx::Error| CoreError::store_failure("Malformed node row", Some(e));

    let category: String = row.try_get("category").map_err(get_err)?;
    let category = Category::from_str(&category)
        .map_err(|e| CoreError::store_failure("Malformed node row", Some(e)))?;

    let difficulty: Option<i16> = row.try_get("difficulty").map_err(get_err)?;
    let difficulty = difficulty
        .map(u8::try_from)
        .transpose()
        .map_err(|e| CoreError::store_failure("Node difficulty out of range", Some(e)))?;

    Ok(Node {
        id: NodeId(row.try_get("id").map_err(get_err)?),
        title: row.try_get("title").map_err(get_err)?,
        category,
        ai_summary: row.try_get("ai_summary").map_err(get_err)?,
        steps: row.try_get("steps").map_err(get_err)?,
        tools: row.try_get("tools").map_err(get_err)?,
        materials: row.try_get("materials").map_err(get_err)?,
        common_mistakes: row.try_get("common_mistakes").map_err(get_err)?,
        difficulty,
        time_estimate: row.try_get("time_estimate").map_err(get_err)?,
        cost_estimate: row.try_get("cost_estimate").map_err(get_err)?,
        created_at: row.try_get("created_at").map_err(get_err)?,
        updated_at: row.try_get("updated_at").map_err(get_err)?,
    })
}

fn row_to_edge(row: &PgRow) -> CoreResult<Edge> {
    let get_err = |e: sqlx::Error| CoreError::store_failure("Malformed edge row", Some(e));

    let relation_type: String = row.try_get("relation_type").map_err(get_err)?;
    let relation_type = RelationType::from_str(&relation_type)
        .map_err(|e| CoreError::store_failure("Malformed edge row", Some(e)))?;

    Ok(Edge {
        id: EdgeId(row.try_get("id").map_err(get_err)?),
        from_node_id: NodeId(row.try_get("from_node_id").map_err(get_err)?),
        to_node_id: NodeId(row.try_get("to_node_id").map_err(get_err)?),
        relation_type,
    })
}

#[async_trait]
impl GraphStore for PostgresGraphStore {
    async fn create_node(&self, node: NewNode) -> CoreResult<Node> {
        let query = format!(
            "INSERT INTO nodes (id, title, category, ai_summary, steps, tools, materials, \
             common_mistakes, difficulty, time_estimate, cost_estimate) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {}",
            NODE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(&node.title)
            .bind(node.category.as_str())
            .bind(&node.ai_summary)
            .bind(&node.steps)
            .bind(&node.tools)
            .bind(&node.materials)
            .bind(&node.common_mistakes)
            .bind(node.difficulty.map(i16::from))
            .bind(&node.time_estimate)
            .bind(&node.cost_estimate)
            .fetch_one(self.conn.pool())
            .await
            .map_err(|e| db_error("Failed to insert node", e))?;

        let node = row_to_node(&row)?;
        debug!(node_id = %node.id, "Inserted node");
        Ok(node)
    }

    async fn get_node(&self, id: &NodeId) -> CoreResult<Option<Node>> {
        let query = format!("SELECT {} FROM nodes WHERE id = $1", NODE_COLUMNS);

        sqlx::query(&query)
            .bind(id.0)
            .fetch_optional(self.conn.pool())
            .await
            .map_err(|e| db_error("Failed to fetch node", e))?
            .as_ref()
            .map(row_to_node)
            .transpose()
    }

    async fn get_nodes_by_ids(&self, ids: &HashSet<NodeId>) -> CoreResult<Vec<Node>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {} FROM nodes WHERE id = ANY($1)", NODE_COLUMNS);

        sqlx::query(&query)
            .bind(to_uuids(ids))
            .fetch_all(self.conn.pool())
            .await
            .map_err(|e| db_error("Failed to fetch nodes", e))?
            .iter()
            .map(row_to_node)
            .collect()
    }

    async fn find_matching_nodes(&self, needle: &str, limit: usize) -> CoreResult<Vec<Node>> {
        let query = format!(
            "SELECT {} FROM nodes \
             WHERE title ILIKE $1 ESCAPE '\\' OR ai_summary ILIKE $1 ESCAPE '\\' \
             ORDER BY created_at, id \
             LIMIT $2",
            NODE_COLUMNS
        );

        sqlx::query(&query)
            .bind(like_pattern(needle))
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(self.conn.pool())
            .await
            .map_err(|e| db_error("Failed to search nodes", e))?
            .iter()
            .map(row_to_node)
            .collect()
    }

    async fn create_edge(
        &self,
        from: &NodeId,
        to: &NodeId,
        relation_type: RelationType,
    ) -> CoreResult<Edge> {
        let mut tx = self
            .conn
            .pool()
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        // Lock both endpoints so neither can be deleted before the insert
        let present: HashSet<Uuid> = sqlx::query("SELECT id FROM nodes WHERE id = ANY($1) FOR SHARE")
            .bind(vec![from.0, to.0])
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to check edge endpoints", e))?
            .iter()
            .map(|row| row.try_get("id"))
            .collect::<Result<_, _>>()
            .map_err(|e| db_error("Malformed node row", e))?;

        for endpoint in [from, to] {
            if !present.contains(&endpoint.0) {
                return Err(CoreError::ReferentialIntegrity {
                    from: *from,
                    to: *to,
                    missing: *endpoint,
                });
            }
        }

        let query = format!(
            "INSERT INTO edges (id, from_node_id, to_node_id, relation_type) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            EDGE_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(from.0)
            .bind(to.0)
            .bind(relation_type.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to insert edge", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit edge", e))?;

        let edge = row_to_edge(&row)?;
        debug!(edge_id = %edge.id, "Inserted edge");
        Ok(edge)
    }

    async fn get_edges_touching(&self, ids: &HashSet<NodeId>) -> CoreResult<Vec<Edge>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {} FROM edges WHERE from_node_id = ANY($1) OR to_node_id = ANY($1)",
            EDGE_COLUMNS
        );

        sqlx::query(&query)
            .bind(to_uuids(ids))
            .fetch_all(self.conn.pool())
            .await
            .map_err(|e| db_error("Failed to fetch edges", e))?
            .iter()
            .map(row_to_edge)
            .collect()
    }

    async fn delete_node(&self, id: &NodeId) -> CoreResult<bool> {
        // Touching edges go with the node through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM nodes WHERE id = $1")
            .bind(id.0)
            .execute(self.conn.pool())
            .await
            .map_err(|e| db_error("Failed to delete node", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> CoreResult<()> {
        let mut tx = self
            .conn
            .pool()
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query("DELETE FROM edges")
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete edges", e))?;
        sqlx::query("DELETE FROM nodes")
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete nodes", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit clear", e))
    }

    async fn health_check(&self) -> CoreResult<bool> {
        match sqlx::query("SELECT 1").execute(self.conn.pool()).await {
            Ok(_) => Ok(true),
            Err(e) => {
                error!(error = %e, "PostgreSQL health check failed");
                Ok(false)
            }
        }
    }
}
