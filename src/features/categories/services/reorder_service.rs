use std::collections::HashSet;

use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::ContentDomain;

/// Persists a new ordering for one sibling group. Scoped strictly to the
/// `(domain, parent_id)` group: reordering under one parent can never
/// touch rows under another.
pub struct ReorderService {
    pool: PgPool,
}

impl ReorderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Rewrite `display_order` to list position (0-based) for the listed
    /// siblings. Ids outside the stated group are rejected rather than
    /// silently reassigned. Applying the same list twice yields the same
    /// final state.
    pub async fn reorder(
        &self,
        domain: ContentDomain,
        parent_id: Option<Uuid>,
        ordered_ids: &[Uuid],
    ) -> Result<()> {
        let rows = sqlx::query(
            r#"
            SELECT id FROM categories
            WHERE domain = $1 AND parent_id IS NOT DISTINCT FROM $2
            "#,
        )
        .bind(domain)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load sibling group: {:?}", e);
            AppError::Database(e)
        })?;

        let siblings: HashSet<Uuid> = rows.into_iter().map(|r| r.get::<Uuid, _>("id")).collect();

        check_sibling_scope(&siblings, ordered_ids)?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        for (position, id) in ordered_ids.iter().enumerate() {
            sqlx::query("UPDATE categories SET display_order = $1, updated_at = NOW() WHERE id = $2")
                .bind(position as i32)
                .bind(*id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to update display order: {:?}", e);
                    AppError::Database(e)
                })?;
        }
        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Reordered {} siblings under parent={:?} in domain={}",
            ordered_ids.len(),
            parent_id,
            domain.as_str()
        );

        Ok(())
    }
}

/// Every listed id must belong to the stated sibling group, exactly once.
/// Ids from another group are rejected rather than silently reassigned.
fn check_sibling_scope(siblings: &HashSet<Uuid>, ordered_ids: &[Uuid]) -> Result<()> {
    let mut seen = HashSet::with_capacity(ordered_ids.len());
    for id in ordered_ids {
        if !siblings.contains(id) {
            return Err(AppError::Validation(format!(
                "Category {} does not belong to this sibling group",
                id
            )));
        }
        if !seen.insert(*id) {
            return Err(AppError::Validation(format!(
                "Category {} appears more than once in the ordering",
                id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_scope_accepts_full_and_partial_orderings() {
        let siblings: HashSet<Uuid> = [id(1), id(2), id(3)].into_iter().collect();
        assert!(check_sibling_scope(&siblings, &[id(3), id(1), id(2)]).is_ok());
        assert!(check_sibling_scope(&siblings, &[id(2), id(1)]).is_ok());
    }

    #[test]
    fn test_scope_rejects_foreign_id() {
        // reordering under node A must never touch node B's children
        let siblings: HashSet<Uuid> = [id(1), id(2)].into_iter().collect();
        assert!(check_sibling_scope(&siblings, &[id(1), id(99)]).is_err());
    }

    #[test]
    fn test_scope_rejects_duplicate_id() {
        let siblings: HashSet<Uuid> = [id(1), id(2)].into_iter().collect();
        assert!(check_sibling_scope(&siblings, &[id(1), id(1)]).is_err());
    }
}
