//! Delivery config endpoints

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::delivery::{
    ConfigStatus, DeliveryConfig, DeliveryConfigUpdate, DeliveryConfigUpsert,
    DeliveryConfigWithTemplate, DeliveryType,
};
use uuid::Uuid;

use crate::auth::user_auth::UserIdentity;
use crate::db;
use crate::delivery::resolver::{self, ResolveBy};
use crate::state::AppState;

use super::{ApiResult, internal, verify_store};

async fn verify_config(
    state: &AppState,
    config_id: Uuid,
    user_id: Uuid,
) -> Result<DeliveryConfig, AppError> {
    let config = db::delivery_configs::find_by_id(&state.pool, config_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::DeliveryConfigNotFound))?;
    verify_store(state, config.store_id, user_id).await?;
    Ok(config)
}

fn validate_type(raw: &str) -> Result<(), AppError> {
    DeliveryType::from_db(raw).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidDeliveryType,
            format!("Unknown delivery type: {raw}"),
        )
    })?;
    Ok(())
}

fn validate_status(raw: &str) -> Result<(), AppError> {
    ConfigStatus::from_db(raw)
        .ok_or_else(|| AppError::validation(format!("Unknown config status: {raw}")))?;
    Ok(())
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub store_id: Uuid,
    pub product_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
}

/// GET /api/product-delivery?store_id&product_id&variant_id
pub async fn list_configs(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<DeliveryConfigWithTemplate>> {
    verify_store(&state, query.store_id, identity.user_id).await?;

    let configs = db::delivery_configs::list_by_store(
        &state.pool,
        query.store_id,
        query.product_id,
        query.variant_id,
    )
    .await
    .map_err(internal)?;

    let templates = db::templates::list_by_store(&state.pool, query.store_id)
        .await
        .map_err(internal)?;
    let by_id: HashMap<Uuid, _> = templates.into_iter().map(|t| (t.id, t)).collect();

    let result = configs
        .into_iter()
        .map(|c| {
            let template = c.template_id.and_then(|tid| by_id.get(&tid).cloned());
            DeliveryConfigWithTemplate {
                config: c,
                template,
            }
        })
        .collect();

    Ok(ApiResponse::success(result))
}

/// POST /api/product-delivery
///
/// Upsert keyed by `(store_id, product_id, variant_id)`. An optional
/// `variants` list upserts per-variant configs in the same call, and
/// `templateName`/`templateContent` create a template inline when no
/// `templateId` is supplied.
pub async fn upsert_config(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<DeliveryConfigUpsert>,
) -> ApiResult<Vec<DeliveryConfig>> {
    verify_store(&state, payload.store_id, identity.user_id).await?;
    validate_type(&payload.config_type)?;
    if let Some(status) = &payload.status {
        validate_status(status)?;
    }

    let now = shared::util::now_millis();

    let template_id = match (payload.template_id, &payload.template_name) {
        (Some(tid), _) => {
            // Must exist and belong to this store
            let template = db::templates::find_by_id(&state.pool, tid)
                .await
                .map_err(internal)?
                .ok_or_else(|| AppError::new(ErrorCode::TemplateNotFound))?;
            if template.store_id != payload.store_id {
                return Err(AppError::new(ErrorCode::TemplateNotFound));
            }
            Some(tid)
        }
        (None, Some(name)) => {
            let content = payload.template_content.as_deref().ok_or_else(|| {
                AppError::validation("templateContent is required with templateName")
            })?;
            let template = db::templates::create(
                &state.pool,
                Uuid::new_v4(),
                payload.store_id,
                name.trim(),
                content,
                now,
            )
            .await
            .map_err(internal)?;
            Some(template.id)
        }
        (None, None) => None,
    };

    let status = payload.status.as_deref().unwrap_or("active");
    let use_ai = payload.use_ai.unwrap_or(false);

    let mut upserted = Vec::new();

    let main = db::delivery_configs::upsert(
        &state.pool,
        payload.store_id,
        payload.product_id,
        payload.variant_id,
        &payload.config_type,
        status,
        payload.account_data.as_deref().unwrap_or(""),
        template_id,
        use_ai,
        now,
    )
    .await
    .map_err(internal)?;
    upserted.push(main);

    for v in payload.variants.as_deref().unwrap_or(&[]) {
        if let Some(s) = &v.status {
            validate_status(s)?;
        }
        let config = db::delivery_configs::upsert(
            &state.pool,
            payload.store_id,
            payload.product_id,
            Some(v.variant_id),
            &payload.config_type,
            v.status.as_deref().unwrap_or(status),
            v.account_data.as_deref().unwrap_or(""),
            template_id,
            use_ai,
            now,
        )
        .await
        .map_err(internal)?;
        upserted.push(config);
    }

    Ok(ApiResponse::success(upserted))
}

#[derive(Deserialize)]
pub struct CheckQuery {
    pub store_id: Uuid,
    pub product_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
}

/// GET /api/product-delivery/check — resolve without fulfilling
pub async fn check(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<CheckQuery>,
) -> ApiResult<DeliveryConfig> {
    verify_store(&state, query.store_id, identity.user_id).await?;

    let candidates =
        db::delivery_configs::fetch_candidates(&state.pool, query.store_id, query.product_id)
            .await
            .map_err(internal)?;
    let by = ResolveBy::from_params(query.product_id, query.variant_id);
    let config = resolver::select(&candidates, by)
        .ok_or_else(|| AppError::new(ErrorCode::DeliveryNotConfigured))?;

    Ok(ApiResponse::success(config.clone()))
}

#[derive(Deserialize)]
pub struct CheckAiQuery {
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct CheckAiResponse {
    pub use_ai: bool,
}

/// GET /api/product-delivery/check-ai — AI reply flag for a product/variant
///
/// The config's flag wins when one resolves; otherwise the product's own
/// flag applies.
pub async fn check_ai(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<CheckAiQuery>,
) -> ApiResult<CheckAiResponse> {
    let product = db::products::find_by_id(&state.pool, query.product_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    verify_store(&state, product.store_id, identity.user_id).await?;

    let candidates = db::delivery_configs::fetch_candidates(
        &state.pool,
        product.store_id,
        Some(query.product_id),
    )
    .await
    .map_err(internal)?;
    let by = ResolveBy::from_params(Some(query.product_id), query.variant_id);

    let use_ai = match resolver::select(&candidates, by) {
        Some(config) => config.use_ai,
        None => product.use_ai,
    };

    Ok(ApiResponse::success(CheckAiResponse { use_ai }))
}

/// GET /api/product-delivery/{id}
pub async fn get_config(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(config_id): Path<Uuid>,
) -> ApiResult<DeliveryConfig> {
    let config = verify_config(&state, config_id, identity.user_id).await?;
    Ok(ApiResponse::success(config))
}

/// PUT /api/product-delivery/{id}
pub async fn update_config(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(config_id): Path<Uuid>,
    Json(payload): Json<DeliveryConfigUpdate>,
) -> ApiResult<DeliveryConfig> {
    verify_config(&state, config_id, identity.user_id).await?;
    if let Some(t) = &payload.config_type {
        validate_type(t)?;
    }
    if let Some(s) = &payload.status {
        validate_status(s)?;
    }

    let config = db::delivery_configs::update(
        &state.pool,
        config_id,
        &payload,
        shared::util::now_millis(),
    )
    .await
    .map_err(internal)?
    .ok_or_else(|| AppError::new(ErrorCode::DeliveryConfigNotFound))?;

    Ok(ApiResponse::success(config))
}

/// DELETE /api/product-delivery/{id}
pub async fn delete_config(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(config_id): Path<Uuid>,
) -> ApiResult<()> {
    verify_config(&state, config_id, identity.user_id).await?;

    db::delivery_configs::delete(&state.pool, config_id)
        .await
        .map_err(internal)?;
    Ok(ApiResponse::ok("Delivery config deleted"))
}
