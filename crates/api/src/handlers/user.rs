//! Handlers for the `/user/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use infocomic_core::error::CoreError;
use infocomic_core::user::{AuthResponse, DEFAULT_EDUCATION_LEVEL};
use infocomic_db::models::user::{CreateUser, User};
use infocomic_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /user/auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    pub password: String,
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub education_level: Option<String>,
}

/// Request body for `POST /user/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /user/auth/register
///
/// Creates the account and signs it in. A taken email is a 409.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let education_level = input
        .education_level
        .filter(|level| !level.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDUCATION_LEVEL.to_string());

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email.trim().to_string(),
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            domains: input.domains,
            education_level,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    let response = auth_response(&state, &user, "User registered successfully")?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /user/auth/login
///
/// Unknown email is a 404; a wrong password is a 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = input.email.trim();
    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                key: email.to_string(),
            })
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid password".into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(auth_response(&state, &user, "Login successful")?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_response(state: &AppState, user: &User, message: &str) -> AppResult<AuthResponse> {
    let token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        user: user.to_public(),
        token,
        message: message.to_string(),
    })
}
