use utoipa::{Modify, OpenApi};

use crate::features::categories::{
    dtos as categories_dtos, handlers as categories_handlers, models as categories_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories (public)
        categories_handlers::category_handler::list_categories,
        categories_handlers::category_handler::get_category,
        // Categories (admin)
        categories_handlers::category_admin_handler::list_categories,
        categories_handlers::category_admin_handler::get_category,
        categories_handlers::category_admin_handler::create_category,
        categories_handlers::category_admin_handler::update_category,
        categories_handlers::category_admin_handler::reorder_siblings,
        categories_handlers::category_admin_handler::delete_category,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_models::ContentDomain,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::ReorderSiblingsDto,
            categories_dtos::DeleteCategoryResponseDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<categories_dtos::DeleteCategoryResponseDto>,
        )
    ),
    tags(
        (name = "categories", description = "Public category reads (navigation)"),
        (name = "categories-admin", description = "Administrative taxonomy management"),
    ),
    info(
        title = "Taxonomy API",
        version = "0.1.0",
        description = "Administrative API for the content category taxonomy",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
