//! Request authentication.
//!
//! The upstream identity provider has already verified the bearer token by
//! the time a request reaches this service; the extractor only decodes the
//! claims payload. Account resolution (including first-login registration)
//! happens lazily via [`AuthUser::resolve`].

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use checker_core::claims::{decode_claims, Claims};
use checker_core::error::CoreError;
use checker_db::models::user::User;

use crate::error::AppError;

/// The authenticated caller, extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
}

impl AuthUser {
    /// Resolve the caller to a user account, registering it on first login.
    pub async fn resolve(&self, pool: &checker_db::DbPool) -> Result<User, AppError> {
        checker_db::auth::resolve_user(pool, &self.claims)
            .await
            .map_err(AppError::from)
    }

    /// Resolve the caller and reject non-admins.
    pub async fn require_admin(&self, pool: &checker_db::DbPool) -> Result<User, AppError> {
        let user = self.resolve(pool).await?;
        if !user.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "this operation requires an admin account".into(),
            )));
        }
        Ok(user)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "missing Authorization header".into(),
                ))
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("expected a Bearer token".into()))
        })?;

        let claims = decode_claims(token).map_err(CoreError::from)?;
        Ok(Self { claims })
    }
}
