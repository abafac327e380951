use anyhow::{Context, Result};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tokio::task;

use crate::entities::users;

/// User data returned from the repository (without the password hash)
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Register a new teacher account. Returns `None` when the username is
    /// already taken; the unique index on `username` backstops a racing
    /// duplicate insert.
    pub async fn register(&self, username: &str, password: &str) -> Result<Option<User>> {
        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to check username availability")?;

        if existing.is_some() {
            return Ok(None);
        }

        let password = password.to_string();
        let password_hash = task::spawn_blocking(move || hash_password(&password))
            .await
            .context("Password hashing task panicked")??;

        let now = chrono::Utc::now().to_rfc3339();

        let model = users::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.conn).await {
            Ok(stored) => Ok(Some(User::from(stored))),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e).context("Failed to insert user"),
        }
    }

    /// Verify a login attempt. Unknown usernames and wrong passwords both
    /// yield `None`; callers cannot tell the two apart.
    /// Note: Argon2 verification is CPU-intensive and runs under
    /// `spawn_blocking` so it does not stall the async runtime.
    pub async fn verify(&self, username: &str, password: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let Some(user) = user else {
            return Ok(None);
        };

        let password_hash = user.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid.then(|| User::from(user)))
    }
}

fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

/// Hash a password using Argon2id with a per-user random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_salted() {
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();

        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$"));
        assert!(!a.contains("pw123"));
    }
}
