use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::categories::handlers::{
    category_admin_handler, category_handler, AdminCategoryState,
};
use crate::features::categories::services::{
    CascadeDeleteResolver, CategoryService, ReorderService,
};

/// Create public routes for the categories feature (no authentication)
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(category_handler::list_categories))
        .route(
            "/api/categories/{slug}",
            get(category_handler::get_category),
        )
        .with_state(service)
}

/// Create admin routes for taxonomy management
pub fn admin_routes(
    categories: Arc<CategoryService>,
    reorder: Arc<ReorderService>,
    resolver: Arc<CascadeDeleteResolver>,
) -> Router {
    let state = AdminCategoryState {
        categories,
        reorder,
        resolver,
    };

    Router::new()
        .route(
            "/api/admin/categories",
            get(category_admin_handler::list_categories)
                .post(category_admin_handler::create_category),
        )
        .route(
            "/api/admin/categories/reorder",
            put(category_admin_handler::reorder_siblings),
        )
        .route(
            "/api/admin/categories/{id}",
            get(category_admin_handler::get_category)
                .put(category_admin_handler::update_category)
                .delete(category_admin_handler::delete_category),
        )
        .with_state(state)
}
