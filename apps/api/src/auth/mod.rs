//! JWT session handling — token issue/verify and the `AuthUser` extractor.
//!
//! Tokens are HS256 bearer tokens signed with `JWT_SECRET`, `sub` = user id,
//! 7-day expiry. Every protected handler takes `AuthUser` as its first
//! extractor; there is no separate auth middleware layer.

pub mod handlers;
pub mod password;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Signs a 7-day HS256 token for the given user.
pub fn issue_token(user_id: Uuid, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign token: {e}")))
}

/// Verifies signature and expiry. Any failure maps to 401 — the client cannot
/// distinguish a forged token from an expired one.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

/// The authenticated user's id, extracted from the `Authorization: Bearer`
/// header. Rejects with 401 when the header is missing or the token invalid.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let claims = verify_token(token, &state.config.jwt_secret)?;
        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-do-not-use";

    #[test]
    fn test_issued_token_round_trips() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token(Uuid::new_v4(), SECRET).unwrap();
        let result = verify_token(&token, "a-different-secret");
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = verify_token("not-a-jwt", SECRET);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_expiry_is_in_the_future() {
        let token = issue_token(Uuid::new_v4(), SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert!(claims.exp > Utc::now().timestamp());
        assert!(claims.exp - claims.iat >= TOKEN_TTL_DAYS * 24 * 3600);
    }
}
