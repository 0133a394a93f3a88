//! Product catalog handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use storefront_core::error::AppError;
use storefront_core::types::ApiResponse;

use crate::dto::request::{CreateProductRequest, UpdateProductRequest};
use crate::dto::response::{ProductPayload, ProductsPayload};
use crate::extractors::{ValidatedJson, parse_uuid};
use crate::state::AppState;

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProductsPayload>>, AppError> {
    let products = state.product_service.list().await?;
    Ok(Json(ApiResponse::ok(
        "Products retrieved successfully",
        ProductsPayload { products },
    )))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductPayload>>, AppError> {
    let product = state.product_service.get(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(
        "Product retrieved successfully",
        ProductPayload { product },
    )))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductPayload>>), AppError> {
    let product = state.product_service.create(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Product created successfully",
            ProductPayload { product },
        )),
    ))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<ApiResponse<ProductPayload>>, AppError> {
    let product = state
        .product_service
        .update(parse_uuid(&id)?, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(
        "Product updated successfully",
        ProductPayload { product },
    )))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Option<()>>>, AppError> {
    state.product_service.delete(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::message("Product deleted successfully")))
}
