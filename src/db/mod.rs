use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::outing_passes;

pub mod migrator;
pub mod repositories;

pub use repositories::pass::{NewPass, mint_token};
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        // A pooled in-memory SQLite database is one database per connection;
        // keep a single connection so tests see their own writes.
        if db_url.contains(":memory:") {
            return Self::with_pool_options(db_url, 1, 1).await;
        }
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn pass_repo(&self) -> repositories::pass::PassRepository {
        repositories::pass::PassRepository::new(self.conn.clone())
    }

    /// Returns `None` when the username is already taken.
    pub async fn register_user(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().register(username, password).await
    }

    /// Returns the user on a successful credential check, `None` otherwise.
    pub async fn verify_user(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify(username, password).await
    }

    pub async fn insert_pass(&self, pass: NewPass) -> Result<outing_passes::Model> {
        self.pass_repo().insert(pass).await
    }

    pub async fn find_pass_by_token(&self, token: &str) -> Result<Option<outing_passes::Model>> {
        self.pass_repo().find_by_token(token).await
    }
}
