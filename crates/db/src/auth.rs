//! First-login user resolution.
//!
//! The identity provider owns authentication; on each request the decoded
//! claims either match an existing account or create one. Admins are
//! created bare; clients get their project holder in the same
//! transaction so a client account never exists without a portfolio.

use checker_core::claims::Claims;
use checker_core::error::CoreError;
use chrono::Utc;

use crate::models::user::{CreateUser, User, UserRole};
use crate::repositories::{ProjectHolderRepo, UserRepo};
use crate::{store_err, DbPool};

/// Resolve the claims tuple to a user account, creating it on first login.
pub async fn resolve_user(pool: &DbPool, claims: &Claims) -> Result<User, CoreError> {
    {
        let mut conn = pool.acquire().await.map_err(store_err)?;
        if let Some(user) = UserRepo::find_by_id(&mut conn, &claims.subject)
            .await
            .map_err(store_err)?
        {
            return Ok(user);
        }
    }

    let role = if claims.is_admin {
        UserRole::Admin
    } else {
        UserRole::Client
    };

    let mut tx = pool.begin().await.map_err(store_err)?;
    let user = UserRepo::create(
        &mut tx,
        &CreateUser {
            id: claims.subject.clone(),
            email: claims.email.clone(),
            username: claims.name.clone(),
            role,
        },
        Utc::now().date_naive(),
    )
    .await
    .map_err(store_err)?;

    if role == UserRole::Client {
        ProjectHolderRepo::create(&mut tx, &user.id)
            .await
            .map_err(store_err)?;
    }
    tx.commit().await.map_err(store_err)?;

    tracing::info!(user_id = %user.id, role = ?user.role, "registered user on first login");
    Ok(user)
}
