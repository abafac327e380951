use sea_orm::entity::prelude::*;

/// An issued permission slip. Rows are insert-only; a pass is never
/// edited or deleted after issuance.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "outing_passes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Student name
    pub name: String,

    /// Server-side issuance timestamp (`%Y-%m-%d %H:%M:%S`)
    pub issue_date: String,

    pub reason: String,

    pub expiry_date: String,

    /// Username of the issuing teacher, copied from the session
    pub teacher: String,

    /// Class/section label
    pub ban: String,

    /// Opaque verification token, also the QR image filename
    #[sea_orm(unique)]
    pub unique_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
