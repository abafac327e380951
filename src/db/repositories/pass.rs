use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::outing_passes;

/// Fields of a pass about to be issued. The row id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPass {
    pub name: String,
    pub issue_date: String,
    pub reason: String,
    pub expiry_date: String,
    pub teacher: String,
    pub ban: String,
    pub unique_id: String,
}

pub struct PassRepository {
    conn: DatabaseConnection,
}

impl PassRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Persist a newly issued pass and return the stored row.
    pub async fn insert(&self, pass: NewPass) -> Result<outing_passes::Model> {
        let model = outing_passes::ActiveModel {
            name: Set(pass.name),
            issue_date: Set(pass.issue_date),
            reason: Set(pass.reason),
            expiry_date: Set(pass.expiry_date),
            teacher: Set(pass.teacher),
            ban: Set(pass.ban),
            unique_id: Set(pass.unique_id),
            ..Default::default()
        };

        model
            .insert(&self.conn)
            .await
            .context("Failed to insert outing pass")
    }

    /// Exact-match lookup by the opaque verification token.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<outing_passes::Model>> {
        let pass = outing_passes::Entity::find()
            .filter(outing_passes::Column::UniqueId.eq(token))
            .one(&self.conn)
            .await
            .context("Failed to query outing pass by token")?;

        Ok(pass)
    }
}

/// Mint a fresh verification token: 32 hex chars from a v4 UUID. Opaque,
/// collision-resistant, and independent of any user-supplied input.
#[must_use]
pub fn mint_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
