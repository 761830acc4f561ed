use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, DeleteCategoryResponseDto, ReorderSiblingsDto,
    UpdateCategoryDto,
};
use crate::features::categories::models::ContentDomain;
use crate::features::categories::services::{
    CascadeDeleteResolver, CategoryService, ReorderService,
};
use crate::shared::types::ApiResponse;

/// State for admin category handlers
#[derive(Clone)]
pub struct AdminCategoryState {
    pub categories: Arc<CategoryService>,
    pub reorder: Arc<ReorderService>,
    pub resolver: Arc<CascadeDeleteResolver>,
}

/// Query params for the admin list
#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    pub domain: Option<ContentDomain>,
}

/// Query params for delete
#[derive(Debug, Deserialize)]
pub struct DeleteCategoryQuery {
    /// Reassign attached content to the fallback category instead of
    /// refusing the delete
    #[serde(default)]
    pub force: bool,
}

/// List all categories including inactive ones (admin view)
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    params(
        ("domain" = Option<ContentDomain>, Query, description = "Scope to one content domain")
    ),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories-admin"
)]
pub async fn list_categories(
    State(state): State<AdminCategoryState>,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories: Vec<CategoryResponseDto> = state
        .categories
        .list_all(query.domain)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories-admin"
)]
pub async fn get_category(
    State(state): State<AdminCategoryState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = state.categories.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 200, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Parent category not found")
    ),
    tag = "categories-admin"
)]
pub async fn create_category(
    State(state): State<AdminCategoryState>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let category = state.categories.create(dto).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// Update a category (rename, recolor, re-icon, reparent)
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories-admin"
)]
pub async fn update_category(
    State(state): State<AdminCategoryState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let category = state.categories.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// Reorder one sibling group
#[utoipa::path(
    put,
    path = "/api/admin/categories/reorder",
    request_body = ReorderSiblingsDto,
    responses(
        (status = 200, description = "Sibling order persisted"),
        (status = 400, description = "Ids outside the sibling group")
    ),
    tag = "categories-admin"
)]
pub async fn reorder_siblings(
    State(state): State<AdminCategoryState>,
    AppJson(dto): AppJson<ReorderSiblingsDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    state
        .reorder
        .reorder(dto.domain, dto.parent_id, &dto.ordered_ids)
        .await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Delete a category
///
/// Without `force`, deletion is refused when content is still attached;
/// the refusal carries the affected count and a sample of titles. With
/// `force=true`, attached content is reassigned to the fallback category
/// first.
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        ("force" = Option<bool>, Query, description = "Reassign attached content to the fallback category")
    ),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<DeleteCategoryResponseDto>),
        (status = 409, description = "Category has associated content and force was not set")
    ),
    tag = "categories-admin"
)]
pub async fn delete_category(
    State(state): State<AdminCategoryState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteCategoryQuery>,
) -> Result<Json<ApiResponse<DeleteCategoryResponseDto>>> {
    state.resolver.delete(id, query.force).await?;
    Ok(Json(ApiResponse::success(
        Some(DeleteCategoryResponseDto { deleted: true }),
        None,
        None,
    )))
}
