//! API routes for dagang-cloud

pub mod auth;
pub mod customer;
pub mod delivery;
pub mod fulfillment;
pub mod health;
pub mod product;
pub mod store;
pub mod template;
pub mod variant;

use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use axum::{Router, middleware};
use shared::error::{ApiResponse, AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::user_auth::user_auth_middleware;
use crate::config::Config;
use crate::db;
use crate::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Map an unexpected storage error to an opaque 500, logging the cause
pub fn internal(e: impl std::fmt::Display) -> AppError {
    tracing::error!("Storage error: {e}");
    AppError::new(ErrorCode::DatabaseError)
}

/// Verify that a store exists and belongs to the given user.
///
/// Every store-scoped handler calls this before touching anything under
/// the store. A missing store is 404; someone else's store is 403.
pub async fn verify_store(
    state: &AppState,
    store_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    let store = db::stores::find_by_id(&state.pool, store_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))?;
    if store.user_id != user_id {
        return Err(AppError::new(ErrorCode::StoreAccessDenied));
    }
    Ok(())
}

/// Ownership walk for a product: product must exist and its store must
/// belong to the user. Returns the owning store id.
pub async fn verify_product(
    state: &AppState,
    product_id: Uuid,
    user_id: Uuid,
) -> Result<Uuid, AppError> {
    let product = db::products::find_by_id(&state.pool, product_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    verify_store(state, product.store_id, user_id).await?;
    Ok(product.store_id)
}

/// Create the combined router
pub fn create_router(state: AppState, config: &Config) -> Result<Router, BoxError> {
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    // Public routes (no auth)
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    // Management API (JWT authenticated)
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/stores", get(store::list_stores).post(store::create_store))
        .route(
            "/api/stores/{id}",
            get(store::get_store)
                .put(store::update_store)
                .delete(store::delete_store),
        )
        .route(
            "/api/products",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/api/products/{id}",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route(
            "/api/product-variants",
            get(variant::list_variants).post(variant::create_variant),
        )
        .route(
            "/api/product-variants/{id}",
            get(variant::get_variant)
                .put(variant::update_variant)
                .delete(variant::delete_variant),
        )
        .route(
            "/api/customers",
            get(customer::list_customers).post(customer::create_customer),
        )
        .route(
            "/api/customers/{id}",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .route(
            "/api/delivery-templates",
            get(template::list_templates).post(template::create_template),
        )
        .route(
            "/api/delivery-templates/{id}",
            get(template::get_template)
                .put(template::update_template)
                .delete(template::delete_template),
        )
        .route(
            "/api/product-delivery",
            get(delivery::list_configs).post(delivery::upsert_config),
        )
        .route("/api/product-delivery/get-product", get(fulfillment::get_product))
        .route("/api/auto-deliveries", get(fulfillment::list_deliveries))
        .route("/api/product-delivery/check", get(delivery::check))
        .route("/api/product-delivery/check-ai", get(delivery::check_ai))
        .route(
            "/api/product-delivery/{id}",
            get(delivery::get_config)
                .put(delivery::update_config)
                .delete(delivery::delete_config),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            user_auth_middleware,
        ));

    Ok(Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
