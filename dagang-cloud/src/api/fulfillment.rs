//! Fulfillment endpoint: deliver product data from the inventory ledger

use axum::{
    Extension,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError};
use shared::models::delivery::AutoDelivery;
use uuid::Uuid;

use crate::auth::user_auth::UserIdentity;
use crate::db;
use crate::delivery::fulfillment::{self, Fulfillment, FulfillmentRequest};
use crate::state::AppState;

use super::{ApiResult, internal, verify_store};

#[derive(Deserialize)]
pub struct GetProductQuery {
    pub store_id: Uuid,
    pub product_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    pub qty: Option<u32>,
    pub order_item_id: Option<String>,
    pub customer_id: Option<String>,
    pub template_text: Option<String>,
}

/// GET /api/product-delivery/get-product
///
/// Resolves the delivery config for the requested product/variant,
/// consumes (or reads) the ledger, and returns the rendered delivery
/// message.
pub async fn get_product(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<GetProductQuery>,
) -> ApiResult<Fulfillment> {
    verify_store(&state, query.store_id, identity.user_id).await?;

    let qty = query.qty.unwrap_or(1);
    if qty < 1 {
        return Err(AppError::validation("qty must be at least 1"));
    }

    // Order context is all-or-nothing
    if query.order_item_id.is_some() != query.customer_id.is_some() {
        return Err(AppError::validation(
            "order_item_id and customer_id must be supplied together",
        ));
    }

    let req = FulfillmentRequest {
        store_id: query.store_id,
        product_id: query.product_id,
        variant_id: query.variant_id,
        qty,
        order_item_id: query.order_item_id,
        customer_id: query.customer_id,
        template_text: query.template_text,
    };

    let result = fulfillment::fulfill(&state.pool, &req).await?;
    Ok(ApiResponse::success(result))
}

#[derive(Deserialize)]
pub struct ListDeliveriesQuery {
    pub store_id: Uuid,
}

/// GET /api/auto-deliveries
///
/// Audit rows for the store's past fulfillments, newest first.
pub async fn list_deliveries(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<ListDeliveriesQuery>,
) -> ApiResult<Vec<AutoDelivery>> {
    verify_store(&state, query.store_id, identity.user_id).await?;

    let rows = db::auto_deliveries::list_by_store(&state.pool, query.store_id)
        .await
        .map_err(internal)?;
    Ok(ApiResponse::success(rows))
}
