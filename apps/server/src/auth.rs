//! Authentication boundary.
//!
//! Token issuance (registration, login, refresh) lives in a separate
//! service. This module only verifies the Bearer JWT that service signs
//! and extracts the numeric principal id that scopes every data access.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::main_lib::AppState;

/// Claims the authentication service puts in its access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub exp: i64,
}

/// Verifies access tokens with the shared HS256 secret.
pub struct AuthManager {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthManager {
    pub fn new(secret: &str) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !secret.is_empty(),
            "FINBOOK_AUTH_SECRET must be set to the token-signing secret"
        );
        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        })
    }

    /// Verifies a token and returns the principal it names.
    pub fn verify(&self, token: &str) -> Result<i64, ApiError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.user_id)
            .map_err(|e| ApiError::Unauthorized(format!("invalid access token: {e}")))
    }
}

/// Extractor yielding the authenticated principal id.
///
/// Handlers take `AuthUser(user_id)` as an argument; requests without a
/// valid Bearer token never reach them.
pub struct AuthUser(pub i64);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing access token".to_string()))?;

        let token = header_value.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("malformed authorization header".to_string())
        })?;

        Ok(AuthUser(state.auth.verify(token)?))
    }
}
