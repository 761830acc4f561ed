pub mod category_admin_handler;
pub mod category_handler;

pub use category_admin_handler::AdminCategoryState;
