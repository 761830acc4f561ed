use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Content domain owning a category tree. Each domain has exactly one
/// logical tree; slugs are unique within a domain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "content_domain", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentDomain {
    News,
    Forum,
}

impl ContentDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentDomain::News => "news",
            ContentDomain::Forum => "forum",
        }
    }
}

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub domain: ContentDomain,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    /// Cached depth (1 for roots). Derived from the parent chain, never
    /// authoritative; rewritten whenever the chain changes.
    pub level: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
