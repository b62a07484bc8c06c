//! Store management endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::store::{Store, StoreCreate, StoreUpdate};
use uuid::Uuid;

use crate::auth::user_auth::UserIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, verify_store};

/// GET /api/stores
pub async fn list_stores(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Vec<Store>> {
    let stores = db::stores::list_by_user(&state.pool, identity.user_id)
        .await
        .map_err(internal)?;
    Ok(ApiResponse::success(stores))
}

/// POST /api/stores
pub async fn create_store(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<StoreCreate>,
) -> ApiResult<Store> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Store name is required"));
    }

    let store = db::stores::create(
        &state.pool,
        payload.store_id.unwrap_or_else(Uuid::new_v4),
        identity.user_id,
        payload.name.trim(),
        payload.description.as_deref(),
        payload.logo_url.as_deref(),
        shared::util::now_millis(),
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(store))
}

/// GET /api/stores/{id}
pub async fn get_store(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(store_id): Path<Uuid>,
) -> ApiResult<Store> {
    verify_store(&state, store_id, identity.user_id).await?;

    let store = db::stores::find_by_id(&state.pool, store_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))?;
    Ok(ApiResponse::success(store))
}

/// PUT /api/stores/{id}
pub async fn update_store(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<StoreUpdate>,
) -> ApiResult<Store> {
    verify_store(&state, store_id, identity.user_id).await?;

    let store = db::stores::update(&state.pool, store_id, &payload, shared::util::now_millis())
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))?;
    Ok(ApiResponse::success(store))
}

/// DELETE /api/stores/{id}
pub async fn delete_store(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(store_id): Path<Uuid>,
) -> ApiResult<()> {
    verify_store(&state, store_id, identity.user_id).await?;

    db::stores::delete(&state.pool, store_id)
        .await
        .map_err(internal)?;
    Ok(ApiResponse::ok("Store deleted"))
}
