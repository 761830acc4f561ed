use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::models::{Category, ContentDomain};
use crate::features::categories::{tree, validator};
use crate::shared::validation::{slugify, SLUG_REGEX};

/// Service for category reads, creation and edits. Reorder and deletion
/// have their own coordinators.
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List active categories (flat), optionally scoped to one domain
    pub async fn list_active(&self, domain: Option<ContentDomain>) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, domain, parent_id, name, slug, description, icon, color, level, display_order, is_active, created_at, updated_at
            FROM categories
            WHERE ($1::content_domain IS NULL OR domain = $1) AND is_active = TRUE
            ORDER BY display_order, id
            "#,
        )
        .bind(domain)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    /// List every category including inactive ones (admin view)
    pub async fn list_all(&self, domain: Option<ContentDomain>) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, domain, parent_id, name, slug, description, icon, color, level, display_order, is_active, created_at, updated_at
            FROM categories
            WHERE ($1::content_domain IS NULL OR domain = $1)
            ORDER BY display_order, id
            "#,
        )
        .bind(domain)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    /// List active categories as a nested forest. Rebuilt from the
    /// current rows on every call; nothing is cached.
    pub async fn list_tree(&self, domain: Option<ContentDomain>) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.list_active(domain).await?;
        Ok(tree::build_forest(categories)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Fetch a category by id, `None` when absent
    pub async fn find(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, domain, parent_id, name, slug, description, icon, color, level, display_order, is_active, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(category)
    }

    /// Fetch a category by id or fail with NotFound
    pub async fn get(&self, id: Uuid) -> Result<Category> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Get an active category by slug within a domain
    pub async fn get_by_slug(&self, domain: ContentDomain, slug: &str) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, domain, parent_id, name, slug, description, icon, color, level, display_order, is_active, created_at, updated_at
            FROM categories
            WHERE domain = $1 AND slug = $2 AND is_active = TRUE
            "#,
        )
        .bind(domain)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by slug: {:?}", e);
            AppError::Database(e)
        })?;

        category.ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Create a category. Structural checks run against the in-memory
    /// node set of the domain before anything is written.
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<Category> {
        let nodes = self.list_all(Some(dto.domain)).await?;

        if let Some(pid) = dto.parent_id {
            if !nodes.iter().any(|c| c.id == pid) {
                return Err(AppError::NotFound(format!(
                    "Parent category {} not found",
                    pid
                )));
            }
        }

        let slug = resolve_slug(dto.slug.as_deref(), &dto.name)?;

        validator::validate(None, dto.parent_id, &slug, &nodes)
            .map_err(|v| AppError::Validation(v.to_string()))?;

        let levels = tree::derive_levels(&nodes);
        let level = dto
            .parent_id
            .map(|p| levels.get(&p).copied().unwrap_or(1) + 1)
            .unwrap_or(1);

        // append after the current siblings; creation order breaks ties
        let display_order = nodes
            .iter()
            .filter(|c| c.parent_id == dto.parent_id)
            .map(|c| c.display_order)
            .max()
            .map(|m| m + 1)
            .unwrap_or(0);

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, domain, parent_id, name, slug, description, icon, color, level, display_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, domain, parent_id, name, slug, description, icon, color, level, display_order, is_active, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(dto.domain)
        .bind(dto.parent_id)
        .bind(&dto.name)
        .bind(&slug)
        .bind(&dto.description)
        .bind(&dto.icon)
        .bind(&dto.color)
        .bind(level)
        .bind(display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Category created: id={}, slug={}, domain={}",
            category.id,
            category.slug,
            category.domain.as_str()
        );

        Ok(category)
    }

    /// Update a category, including reparenting. The post-edit candidate
    /// is validated against the full domain node set before the write.
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<Category> {
        let existing = self.get(id).await?;
        let nodes = self.list_all(Some(existing.domain)).await?;

        if let Some(pid) = dto.parent_id {
            if !nodes.iter().any(|c| c.id == pid) {
                return Err(AppError::NotFound(format!(
                    "Parent category {} not found",
                    pid
                )));
            }
        }

        let slug = resolve_slug(dto.slug.as_deref(), &dto.name)?;

        validator::validate(Some(id), dto.parent_id, &slug, &nodes)
            .map_err(|v| AppError::Validation(v.to_string()))?;

        let reparented = dto.parent_id != existing.parent_id;
        // a reparented node joins the end of its new sibling group
        let display_order = if reparented {
            nodes
                .iter()
                .filter(|c| c.parent_id == dto.parent_id && c.id != id)
                .map(|c| c.display_order)
                .max()
                .map(|m| m + 1)
                .unwrap_or(0)
        } else {
            existing.display_order
        };
        let is_active = dto.is_active.unwrap_or(existing.is_active);

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1, slug = $2, description = $3, icon = $4, color = $5,
                parent_id = $6, display_order = $7, is_active = $8, updated_at = NOW()
            WHERE id = $9
            RETURNING id, domain, parent_id, name, slug, description, icon, color, level, display_order, is_active, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&slug)
        .bind(&dto.description)
        .bind(&dto.icon)
        .bind(&dto.color)
        .bind(dto.parent_id)
        .bind(display_order)
        .bind(is_active)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Category updated: id={}, slug={}", category.id, category.slug);

        if reparented {
            // the subtree moved; its cached levels are stale
            self.sync_levels(existing.domain).await?;
            return self.get(id).await;
        }

        Ok(category)
    }

    /// Rewrite cached levels that no longer match the parent chain.
    /// Cheap for trees this shallow; called after any reparenting write.
    pub(crate) async fn sync_levels(&self, domain: ContentDomain) -> Result<()> {
        let nodes = self.list_all(Some(domain)).await?;
        let levels = tree::derive_levels(&nodes);

        for node in &nodes {
            let derived = levels.get(&node.id).copied().unwrap_or(1);
            if node.level != derived {
                sqlx::query("UPDATE categories SET level = $1 WHERE id = $2")
                    .bind(derived)
                    .bind(node.id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to sync category level: {:?}", e);
                        AppError::Database(e)
                    })?;
            }
        }

        Ok(())
    }
}

/// An explicit slug is used verbatim after format checking; otherwise the
/// slug is derived from the name.
fn resolve_slug(explicit: Option<&str>, name: &str) -> Result<String> {
    match explicit {
        Some(slug) => {
            if !SLUG_REGEX.is_match(slug) {
                return Err(AppError::Validation(format!(
                    "Invalid slug '{}': must be lowercase alphanumeric with single hyphens",
                    slug
                )));
            }
            Ok(slug.to_string())
        }
        None => {
            let slug = slugify(name);
            if slug.is_empty() {
                return Err(AppError::Validation(format!(
                    "Name '{}' does not produce a usable slug; supply one explicitly",
                    name
                )));
            }
            Ok(slug)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_slug_generates_from_name() {
        assert_eq!(resolve_slug(None, "Local News").unwrap(), "local-news");
    }

    #[test]
    fn test_resolve_slug_explicit_used_verbatim() {
        assert_eq!(
            resolve_slug(Some("breaking"), "Local News").unwrap(),
            "breaking"
        );
    }

    #[test]
    fn test_resolve_slug_rejects_bad_explicit() {
        assert!(resolve_slug(Some("Bad Slug"), "whatever").is_err());
        assert!(resolve_slug(Some("double--hyphen"), "whatever").is_err());
    }

    #[test]
    fn test_resolve_slug_rejects_unusable_name() {
        assert!(resolve_slug(None, "!!!").is_err());
    }
}
