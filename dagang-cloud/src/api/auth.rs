//! Authentication endpoints: register, login, me, refresh

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::user::User;
use uuid::Uuid;

use crate::auth::user_auth::{UserIdentity, create_token};
use crate::db;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

use super::{ApiResult, internal};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            "Invalid email address",
        ));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    if db::users::find_by_email(&state.pool, &email)
        .await
        .map_err(internal)?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let user_id = Uuid::new_v4();
    let now = shared::util::now_millis();
    db::users::create(
        &state.pool,
        user_id,
        &email,
        &password_hash,
        req.full_name.as_deref(),
        now,
    )
    .await
    .map_err(internal)?;

    let token = create_token(user_id, &email, &state.jwt_secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(ApiResponse::success(AuthResponse {
        token,
        user: User {
            id: user_id,
            email,
            full_name: req.full_name,
        },
    }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let email = req.email.trim().to_lowercase();
    let user = db::users::find_by_email(&state.pool, &email)
        .await
        .map_err(internal)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::invalid_credentials());
    }

    let token = create_token(user.id, &user.email, &state.jwt_secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(ApiResponse::success(AuthResponse {
        token,
        user: User {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
        },
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<User> {
    let user = db::users::find_by_id(&state.pool, identity.user_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    Ok(ApiResponse::success(User {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
    }))
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// POST /api/auth/refresh — reissue a token for the authenticated user
pub async fn refresh(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<RefreshResponse> {
    let token = create_token(identity.user_id, &identity.email, &state.jwt_secret).map_err(
        |e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        },
    )?;

    Ok(ApiResponse::success(RefreshResponse { token }))
}
