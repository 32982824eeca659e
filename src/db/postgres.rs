use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::{EmployeeStore, StoreError};
use crate::models::employee::Employee;
use crate::utils::validation::EmployeeFields;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StoreError::DuplicateEmail
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        // `seq` orders rows written within the same timestamp.
        let employees =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY created_at DESC, seq DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(employees)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn find_by_email(&self, email: &str, excluding: Option<Uuid>) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2::uuid) LIMIT 1",
        )
        .bind(email)
        .bind(excluding)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    async fn insert(&self, fields: &EmployeeFields) -> Result<Employee, StoreError> {
        let now = Utc::now();

        sqlx::query_as::<_, Employee>(
            "INSERT INTO employees (id, name, email, department, joining_date, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.department)
        .bind(fields.joining_date)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn replace(&self, id: Uuid, fields: &EmployeeFields) -> Result<Option<Employee>, StoreError> {
        sqlx::query_as::<_, Employee>(
            "UPDATE employees SET name = $1, email = $2, department = $3, joining_date = $4, updated_at = $5 \
             WHERE id = $6 RETURNING *",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.department)
        .bind(fields.joining_date)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>("DELETE FROM employees WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }
}
