pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::models::employee::Employee;
use crate::utils::validation::EmployeeFields;

pub use memory::MemoryEmployeeStore;
pub use postgres::PgEmployeeStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store's own unique constraint on `email` rejected the write.
    #[error("email already belongs to another employee")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Canonical owner of employee records.
///
/// `insert` and `replace` never let two records share an email: implementations either
/// make the check and the write atomic or surface the backstop as
/// [`StoreError::DuplicateEmail`].
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Newest first by `created_at`.
    async fn find_all(&self) -> Result<Vec<Employee>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, StoreError>;
    async fn find_by_email(&self, email: &str, excluding: Option<Uuid>) -> Result<Option<Employee>, StoreError>;
    async fn insert(&self, fields: &EmployeeFields) -> Result<Employee, StoreError>;
    async fn replace(&self, id: Uuid, fields: &EmployeeFields) -> Result<Option<Employee>, StoreError>;
    async fn remove(&self, id: Uuid) -> Result<Option<Employee>, StoreError>;
}

pub async fn create_pool(config: &Config, database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|err| StoreError::Unavailable(err.to_string()))?;

    Ok(pool)
}
