pub mod category;
pub mod content_item;

pub use category::{Category, ContentDomain};
pub use content_item::ContentItem;
