use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::ContentDomain;

/// Minimal view of a content item (news article or forum thread). Only
/// what the association index needs; content CRUD lives outside this
/// service.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct ContentItem {
    pub id: Uuid,
    pub domain: ContentDomain,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
