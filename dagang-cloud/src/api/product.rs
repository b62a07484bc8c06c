//! Product management endpoints

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::product::{Product, ProductCreate, ProductUpdate, ProductWithVariants};
use uuid::Uuid;

use crate::auth::user_auth::UserIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, verify_product, verify_store};

#[derive(Deserialize)]
pub struct StoreQuery {
    pub store_id: Uuid,
}

/// GET /api/products?store_id
pub async fn list_products(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<Vec<ProductWithVariants>> {
    verify_store(&state, query.store_id, identity.user_id).await?;

    let products = db::products::list_by_store(&state.pool, query.store_id)
        .await
        .map_err(internal)?;
    let variants = db::variants::list_by_store(&state.pool, query.store_id)
        .await
        .map_err(internal)?;

    let mut by_product: HashMap<Uuid, Vec<_>> = HashMap::new();
    for v in variants {
        by_product.entry(v.product_id).or_default().push(v);
    }

    let result = products
        .into_iter()
        .map(|p| {
            let variants = by_product.remove(&p.id).unwrap_or_default();
            ProductWithVariants {
                product: p,
                variants,
            }
        })
        .collect();

    Ok(ApiResponse::success(result))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<ProductCreate>,
) -> ApiResult<Product> {
    verify_store(&state, payload.store_id, identity.user_id).await?;

    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Product name is required"));
    }

    let product = db::products::create(
        &state.pool,
        payload.product_id.unwrap_or_else(Uuid::new_v4),
        payload.store_id,
        payload.name.trim(),
        payload.description.as_deref(),
        payload.use_ai.unwrap_or(false),
        payload.variants.as_deref().unwrap_or(&[]),
        shared::util::now_millis(),
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(product))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(product_id): Path<Uuid>,
) -> ApiResult<ProductWithVariants> {
    verify_product(&state, product_id, identity.user_id).await?;

    let product = db::products::find_by_id(&state.pool, product_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    let variants = db::variants::list_by_product(&state.pool, product_id)
        .await
        .map_err(internal)?;

    Ok(ApiResponse::success(ProductWithVariants {
        product,
        variants,
    }))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<ProductUpdate>,
) -> ApiResult<Product> {
    verify_product(&state, product_id, identity.user_id).await?;

    let product = db::products::update(
        &state.pool,
        product_id,
        &payload,
        shared::util::now_millis(),
    )
    .await
    .map_err(internal)?
    .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    Ok(ApiResponse::success(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(product_id): Path<Uuid>,
) -> ApiResult<()> {
    verify_product(&state, product_id, identity.user_id).await?;

    db::products::delete(&state.pool, product_id)
        .await
        .map_err(internal)?;
    Ok(ApiResponse::ok("Product deleted"))
}
