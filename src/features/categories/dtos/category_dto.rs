use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{Category, ContentDomain};
use crate::features::categories::tree::TreeNode;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub domain: ContentDomain,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub level: i32,
    pub display_order: i32,
    pub is_active: bool,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            domain: c.domain,
            parent_id: c.parent_id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            icon: c.icon,
            color: c.color,
            level: c.level,
            display_order: c.display_order,
            is_active: c.is_active,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub domain: ContentDomain,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub level: i32,
    pub display_order: i32,
    pub children: Vec<CategoryTreeDto>,
}

impl From<TreeNode> for CategoryTreeDto {
    fn from(node: TreeNode) -> Self {
        let c = node.category;
        Self {
            id: c.id,
            domain: c.domain,
            name: c.name,
            slug: c.slug,
            description: c.description,
            icon: c.icon,
            color: c.color,
            level: c.level,
            display_order: c.display_order,
            children: node.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    pub domain: ContentDomain,

    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    /// Explicit slug; generated from the name when omitted
    #[validate(length(min = 1, max = 120, message = "Slug must be 1-120 characters"))]
    pub slug: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 64, message = "Icon must be at most 64 characters"))]
    pub icon: Option<String>,

    #[validate(length(max = 32, message = "Color must be at most 32 characters"))]
    pub color: Option<String>,

    /// Parent category; omit for a root
    pub parent_id: Option<Uuid>,
}

/// Request DTO for updating a category. `parent_id = null` moves the
/// category to the root.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    /// Explicit slug; regenerated from the name when omitted
    #[validate(length(min = 1, max = 120, message = "Slug must be 1-120 characters"))]
    pub slug: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 64, message = "Icon must be at most 64 characters"))]
    pub icon: Option<String>,

    #[validate(length(max = 32, message = "Color must be at most 32 characters"))]
    pub color: Option<String>,

    pub parent_id: Option<Uuid>,

    /// Soft-enable flag; unchanged when omitted
    pub is_active: Option<bool>,
}

/// Request DTO for reordering one sibling group
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReorderSiblingsDto {
    pub domain: ContentDomain,

    /// Shared parent of the listed siblings; null for root siblings
    pub parent_id: Option<Uuid>,

    #[validate(length(min = 1, message = "ordered_ids must not be empty"))]
    pub ordered_ids: Vec<Uuid>,
}

/// Response DTO for a successful delete
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteCategoryResponseDto {
    pub deleted: bool,
}
