use std::collections::HashMap;

use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::shared::constants::BLOCKED_DELETE_SAMPLE_LIMIT;

/// Per-category content association counts, used for "N items" badges and
/// as the precondition check before deletion.
pub struct AssociationIndex {
    pool: PgPool,
}

impl AssociationIndex {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Association counts for a set of categories. Categories with no
    /// links are absent from the map; callers read missing as zero. An
    /// empty link table is a valid state, never an error.
    pub async fn counts(&self, category_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>> {
        let rows = sqlx::query(
            r#"
            SELECT category_id, COUNT(*) AS content_count
            FROM content_category_links
            WHERE category_id = ANY($1)
            GROUP BY category_id
            "#,
        )
        .bind(category_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count content associations: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.get::<Uuid, _>("category_id"),
                    row.get::<i64, _>("content_count"),
                )
            })
            .collect())
    }

    /// Count for a single category; zero when nothing is linked
    pub async fn count_for(&self, category_id: Uuid) -> Result<i64> {
        Ok(self
            .counts(&[category_id])
            .await?
            .get(&category_id)
            .copied()
            .unwrap_or(0))
    }

    /// Titles of content still attached to the category, oldest first,
    /// capped for the blocked-delete refusal body.
    pub async fn sample_titles(&self, category_id: Uuid) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT ci.title
            FROM content_category_links l
            JOIN content_items ci ON ci.id = l.content_id
            WHERE l.category_id = $1
            ORDER BY ci.created_at
            LIMIT $2
            "#,
        )
        .bind(category_id)
        .bind(BLOCKED_DELETE_SAMPLE_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to sample content titles: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows
            .into_iter()
            .map(|row| row.get::<String, _>("title"))
            .collect())
    }
}
