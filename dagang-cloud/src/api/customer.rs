//! Customer endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::customer::{Customer, CustomerCreate, CustomerUpdate};
use uuid::Uuid;

use crate::auth::user_auth::UserIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal, verify_store};

async fn verify_customer(
    state: &AppState,
    customer_id: Uuid,
    user_id: Uuid,
) -> Result<Customer, AppError> {
    let customer = db::customers::find_by_id(&state.pool, customer_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;
    verify_store(state, customer.store_id, user_id).await?;
    Ok(customer)
}

#[derive(Deserialize)]
pub struct StoreQuery {
    pub store_id: Uuid,
}

/// GET /api/customers?store_id
pub async fn list_customers(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<StoreQuery>,
) -> ApiResult<Vec<Customer>> {
    verify_store(&state, query.store_id, identity.user_id).await?;

    let customers = db::customers::list_by_store(&state.pool, query.store_id)
        .await
        .map_err(internal)?;
    Ok(ApiResponse::success(customers))
}

/// POST /api/customers
pub async fn create_customer(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(payload): Json<CustomerCreate>,
) -> ApiResult<Customer> {
    verify_store(&state, payload.store_id, identity.user_id).await?;

    if payload.contact_id.trim().is_empty() {
        return Err(AppError::validation("contact_id is required"));
    }

    let result = db::customers::create(
        &state.pool,
        payload.customer_id.unwrap_or_else(Uuid::new_v4),
        payload.store_id,
        payload.contact_id.trim(),
        &payload.contact_type,
        &payload.name,
        shared::util::now_millis(),
    )
    .await;

    match result {
        Ok(customer) => Ok(ApiResponse::success(customer)),
        Err(e)
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation()) =>
        {
            Err(AppError::new(ErrorCode::CustomerContactExists))
        }
        Err(e) => Err(internal(e)),
    }
}

/// GET /api/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(customer_id): Path<Uuid>,
) -> ApiResult<Customer> {
    let customer = verify_customer(&state, customer_id, identity.user_id).await?;
    Ok(ApiResponse::success(customer))
}

/// PUT /api/customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(customer_id): Path<Uuid>,
    Json(payload): Json<CustomerUpdate>,
) -> ApiResult<Customer> {
    verify_customer(&state, customer_id, identity.user_id).await?;

    let result = db::customers::update(
        &state.pool,
        customer_id,
        &payload,
        shared::util::now_millis(),
    )
    .await;

    match result {
        Ok(Some(customer)) => Ok(ApiResponse::success(customer)),
        Ok(None) => Err(AppError::new(ErrorCode::CustomerNotFound)),
        Err(e)
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation()) =>
        {
            Err(AppError::new(ErrorCode::CustomerContactExists))
        }
        Err(e) => Err(internal(e)),
    }
}

/// DELETE /api/customers/{id}
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(customer_id): Path<Uuid>,
) -> ApiResult<()> {
    verify_customer(&state, customer_id, identity.user_id).await?;

    db::customers::delete(&state.pool, customer_id)
        .await
        .map_err(internal)?;
    Ok(ApiResponse::ok("Customer deleted"))
}
