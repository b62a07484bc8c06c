//! Delivery template endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::delivery::{DeliveryTemplate, TemplateCreate, TemplateUpdate};
use uuid::Uuid;

use crate::auth::user_auth::UserIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, verify_store};

async fn verify_template(
    state: &AppState,
    template_id: Uuid,
    user_id: Uuid,
) -> Result<DeliveryTemplate, AppError> {
    let template = db::templates::find_by_id(&state.pool, template_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::TemplateNotFound))?;
    verify_store(state, template.store_id, user_id).await?;
    Ok(template)
}

#[derive(Deserialize)]
pub struct StoreQuery {
    pub store_id: Uuid,
}

/// GET /api/delivery-templates?store_id
pub async fn list_templates(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<Vec<DeliveryTemplate>> {
    verify_store(&state, query.store_id, identity.user_id).await?;

    let templates = db::templates::list_by_store(&state.pool, query.store_id)
        .await
        .map_err(internal)?;
    Ok(ApiResponse::success(templates))
}

/// POST /api/delivery-templates
pub async fn create_template(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<TemplateCreate>,
) -> ApiResult<DeliveryTemplate> {
    verify_store(&state, payload.store_id, identity.user_id).await?;

    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Template name is required"));
    }

    let template = db::templates::create(
        &state.pool,
        Uuid::new_v4(),
        payload.store_id,
        payload.name.trim(),
        &payload.content,
        shared::util::now_millis(),
    )
    .await
    .map_err(internal)?;

    Ok(ApiResponse::success(template))
}

/// GET /api/delivery-templates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(template_id): Path<Uuid>,
) -> ApiResult<DeliveryTemplate> {
    let template = verify_template(&state, template_id, identity.user_id).await?;
    Ok(ApiResponse::success(template))
}

/// PUT /api/delivery-templates/{id}
pub async fn update_template(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(template_id): Path<Uuid>,
    Json(payload): Json<TemplateUpdate>,
) -> ApiResult<DeliveryTemplate> {
    verify_template(&state, template_id, identity.user_id).await?;

    let template = db::templates::update(
        &state.pool,
        template_id,
        &payload.name,
        &payload.content,
        shared::util::now_millis(),
    )
    .await
    .map_err(internal)?
    .ok_or_else(|| AppError::new(ErrorCode::TemplateNotFound))?;

    Ok(ApiResponse::success(template))
}

/// DELETE /api/delivery-templates/{id}
///
/// Refused while any delivery config still references the template.
pub async fn delete_template(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(template_id): Path<Uuid>,
) -> ApiResult<()> {
    verify_template(&state, template_id, identity.user_id).await?;

    let refs = db::templates::count_referencing_configs(&state.pool, template_id)
        .await
        .map_err(internal)?;
    if refs > 0 {
        return Err(
            AppError::new(ErrorCode::TemplateInUse).with_detail("config_count", refs),
        );
    }

    db::templates::delete(&state.pool, template_id)
        .await
        .map_err(internal)?;
    Ok(ApiResponse::ok("Template deleted"))
}
