//! Axum route handlers for registration and login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::issue_token;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = request.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::Validation("email is not valid".to_string()));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::UnprocessableEntity(
            "email is already registered".to_string(),
        ));
    }

    let password_hash = hash_password(&request.password)?;

    // Streak state starts empty: no last practice date, streak 0, average 0.
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, name, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(request.name.trim())
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Registered user {}", user.id);

    let token = issue_token(user.id, &state.config.jwt_secret)?;
    Ok(Json(AuthResponse { token, user }))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = request.email.trim().to_lowercase();

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    // Same rejection for unknown email and bad password
    let user = user.ok_or(AppError::Unauthorized)?;
    if !verify_password(&request.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(user.id, &state.config.jwt_secret)?;
    Ok(Json(AuthResponse { token, user }))
}
