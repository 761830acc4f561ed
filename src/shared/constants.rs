/// Maximum depth of a category tree (roots are level 1)
pub const MAX_TREE_DEPTH: i32 = 3;

/// Display name of the lazily-created fallback category that absorbs
/// content associations during forced deletion
pub const FALLBACK_CATEGORY_NAME: &str = "General";

/// Reserved slug identifying the fallback category within a domain
pub const FALLBACK_CATEGORY_SLUG: &str = "general";

/// Display order of the fallback category; high so it sorts last among roots
pub const FALLBACK_DISPLAY_ORDER: i32 = 9999;

/// Maximum number of affected content titles included in a blocked-delete
/// refusal
pub const BLOCKED_DELETE_SAMPLE_LIMIT: i64 = 5;
