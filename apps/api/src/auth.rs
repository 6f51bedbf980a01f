//! Caller identity. Tokens are issued elsewhere; this only decodes them.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::Role;
use crate::state::AppState;

pub const TOKEN_HEADER: &str = "x-auth-token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub role: Role,
    pub exp: usize,
}

/// The authenticated user behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub role: Role,
}

impl Caller {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    pub fn require_recruiter(&self) -> Result<(), AppError> {
        if self.role == Role::Recruiter {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

pub fn decode_token(token: &str, secret: &str) -> Result<Caller, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        warn!("Token verification failed: {e}");
        AppError::Unauthorized("Token is not valid".to_string())
    })?;

    Ok(Caller {
        id: data.claims.id,
        role: data.claims.role,
    })
}

fn extract_token(parts: &Parts) -> Option<&str> {
    if let Some(token) = parts
        .headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        return Some(token.trim());
    }
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".to_string()))?;
        decode_token(token, &state.config.jwt_secret)
    }
}
