use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, ContentDomain};
use crate::shared::constants::{
    FALLBACK_CATEGORY_NAME, FALLBACK_CATEGORY_SLUG, FALLBACK_DISPLAY_ORDER,
};

use super::association_index::AssociationIndex;
use super::category_service::CategoryService;

/// What to do with a delete request given its association count.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteAction {
    /// Nothing attached; delete directly
    Delete,
    /// Content attached and no force flag; refuse with detail
    Block,
    /// Content attached and force requested; migrate links first
    ReassignThenDelete,
}

/// Pure decision step of the resolver, kept separate so the state machine
/// is testable without a store.
pub fn plan(affected_count: i64, force: bool) -> DeleteAction {
    match (affected_count > 0, force) {
        (false, _) => DeleteAction::Delete,
        (true, false) => DeleteAction::Block,
        (true, true) => DeleteAction::ReassignThenDelete,
    }
}

/// Orchestrates safe category deletion.
///
/// The reassign path (resolve fallback, migrate links, drop links, drop
/// row) is multi-statement and not atomic. Every step is idempotent, so a
/// delete that failed midway converges when retried with the same id and
/// `force=true`: fallback lookup-or-create reuses the existing row, link
/// migration de-duplicates, and deleting an already-gone category is a
/// success.
pub struct CascadeDeleteResolver {
    pool: PgPool,
    categories: Arc<CategoryService>,
    associations: Arc<AssociationIndex>,
}

impl CascadeDeleteResolver {
    pub fn new(
        pool: PgPool,
        categories: Arc<CategoryService>,
        associations: Arc<AssociationIndex>,
    ) -> Self {
        Self {
            pool,
            categories,
            associations,
        }
    }

    pub async fn delete(&self, id: Uuid, force: bool) -> Result<()> {
        let Some(target) = self.categories.find(id).await? else {
            tracing::info!("Category {} already absent, treating delete as success", id);
            return Ok(());
        };

        let affected = self.associations.count_for(id).await?;
        match plan(affected, force) {
            DeleteAction::Block => {
                let sample_titles = self.associations.sample_titles(id).await?;
                return Err(AppError::DeleteBlocked {
                    affected_count: affected,
                    sample_titles,
                });
            }
            DeleteAction::ReassignThenDelete => {
                self.reassign_to_fallback(&target).await?;
            }
            DeleteAction::Delete => {}
        }

        self.promote_children(&target).await?;
        self.delete_and_verify(&target).await?;
        self.categories.sync_levels(target.domain).await?;

        tracing::info!(
            "Category deleted: id={}, slug={}, reassigned_links={}",
            target.id,
            target.slug,
            affected
        );

        Ok(())
    }

    /// Look up the domain's fallback category by its reserved slug,
    /// creating it as a last-sorted root when missing. The insert races
    /// through the unique `(domain, slug)` index, so concurrent deletes
    /// converge on a single fallback row.
    async fn resolve_fallback(&self, domain: ContentDomain) -> Result<Category> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, domain, parent_id, name, slug, level, display_order)
            VALUES ($1, $2, NULL, $3, $4, 1, $5)
            ON CONFLICT (domain, slug) DO NOTHING
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(domain)
        .bind(FALLBACK_CATEGORY_NAME)
        .bind(FALLBACK_CATEGORY_SLUG)
        .bind(FALLBACK_DISPLAY_ORDER)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create fallback category: {:?}", e);
            AppError::Database(e)
        })?;

        let fallback = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, domain, parent_id, name, slug, description, icon, color, level, display_order, is_active, created_at, updated_at
            FROM categories
            WHERE domain = $1 AND slug = $2
            "#,
        )
        .bind(domain)
        .bind(FALLBACK_CATEGORY_SLUG)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up fallback category: {:?}", e);
            AppError::Database(e)
        })?;

        fallback.ok_or_else(|| {
            AppError::Integrity("Fallback category missing immediately after creation".to_string())
        })
    }

    /// Move every content link from the target onto the fallback, skipping
    /// pairs the fallback already has, then drop the target's links.
    async fn reassign_to_fallback(&self, target: &Category) -> Result<()> {
        let fallback = self.resolve_fallback(target.domain).await?;

        if fallback.id != target.id {
            sqlx::query(
                r#"
                INSERT INTO content_category_links (content_id, category_id)
                SELECT content_id, $2
                FROM content_category_links
                WHERE category_id = $1
                ON CONFLICT (content_id, category_id) DO NOTHING
                "#,
            )
            .bind(target.id)
            .bind(fallback.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to migrate content links: {:?}", e);
                AppError::Database(e)
            })?;

            tracing::info!(
                "Reassigned content links from category {} to fallback {}",
                target.id,
                fallback.id
            );
        }

        sqlx::query("DELETE FROM content_category_links WHERE category_id = $1")
            .bind(target.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to drop content links: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }

    /// Children of the deleted node are promoted to its parent rather
    /// than deleted or blocked. Promotion moves nodes toward the root, so
    /// the depth bound always holds afterwards.
    async fn promote_children(&self, target: &Category) -> Result<()> {
        sqlx::query("UPDATE categories SET parent_id = $1, updated_at = NOW() WHERE parent_id = $2")
            .bind(target.parent_id)
            .bind(target.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to promote child categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }

    /// Remove the row, then re-read it. A row that survives a
    /// reported-successful delete is a data-integrity alarm, not a
    /// retryable failure.
    async fn delete_and_verify(&self, target: &Category) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(target.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        if self.categories.find(target.id).await?.is_some() {
            return Err(AppError::Integrity(format!(
                "Category {} still present after delete",
                target.id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_no_associations_deletes() {
        assert_eq!(plan(0, false), DeleteAction::Delete);
        assert_eq!(plan(0, true), DeleteAction::Delete);
    }

    #[test]
    fn test_plan_associations_without_force_blocks() {
        assert_eq!(plan(3, false), DeleteAction::Block);
        assert_eq!(plan(1, false), DeleteAction::Block);
    }

    #[test]
    fn test_plan_associations_with_force_reassigns() {
        assert_eq!(plan(3, true), DeleteAction::ReassignThenDelete);
    }
}
