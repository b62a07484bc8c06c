//! Product variant endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::product::{ProductVariant, VariantCreate, VariantUpdate};
use uuid::Uuid;

use crate::auth::user_auth::UserIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, verify_product};

/// Ownership walk for a variant: variant -> product -> store -> user
async fn verify_variant(
    state: &AppState,
    variant_id: Uuid,
    user_id: Uuid,
) -> Result<ProductVariant, AppError> {
    let variant = db::variants::find_by_id(&state.pool, variant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::VariantNotFound))?;
    verify_product(state, variant.product_id, user_id).await?;
    Ok(variant)
}

#[derive(Deserialize)]
pub struct ProductQuery {
    pub product_id: Uuid,
}

/// GET /api/product-variants?product_id
pub async fn list_variants(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Vec<ProductVariant>> {
    verify_product(&state, query.product_id, identity.user_id).await?;

    let variants = db::variants::list_by_product(&state.pool, query.product_id)
        .await
        .map_err(internal)?;
    Ok(ApiResponse::success(variants))
}

/// POST /api/product-variants
pub async fn create_variant(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<VariantCreate>,
) -> ApiResult<ProductVariant> {
    verify_product(&state, payload.product_id, identity.user_id).await?;

    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Variant name is required"));
    }

    let variant = db::variants::create(
        &state.pool,
        payload.variant_id.unwrap_or_else(Uuid::new_v4),
        payload.product_id,
        payload.name.trim(),
        payload.price,
        payload.is_active.unwrap_or(true),
        shared::util::now_millis(),
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(variant))
}

/// GET /api/product-variants/{id}
pub async fn get_variant(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(variant_id): Path<Uuid>,
) -> ApiResult<ProductVariant> {
    let variant = verify_variant(&state, variant_id, identity.user_id).await?;
    Ok(ApiResponse::success(variant))
}

/// PUT /api/product-variants/{id}
pub async fn update_variant(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(variant_id): Path<Uuid>,
    Json(payload): Json<VariantUpdate>,
) -> ApiResult<ProductVariant> {
    verify_variant(&state, variant_id, identity.user_id).await?;

    let variant = db::variants::update(
        &state.pool,
        variant_id,
        &payload,
        shared::util::now_millis(),
    )
    .await
    .map_err(internal)?
    .ok_or_else(|| AppError::new(ErrorCode::VariantNotFound))?;

    Ok(ApiResponse::success(variant))
}

/// DELETE /api/product-variants/{id}
pub async fn delete_variant(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(variant_id): Path<Uuid>,
) -> ApiResult<()> {
    verify_variant(&state, variant_id, identity.user_id).await?;

    db::variants::delete(&state.pool, variant_id)
        .await
        .map_err(internal)?;
    Ok(ApiResponse::ok("Variant deleted"))
}
