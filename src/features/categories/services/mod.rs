pub mod association_index;
pub mod cascade_delete;
pub mod category_service;
pub mod reorder_service;

pub use association_index::AssociationIndex;
pub use cascade_delete::CascadeDeleteResolver;
pub use category_service::CategoryService;
pub use reorder_service::ReorderService;
