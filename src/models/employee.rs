use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{NaiveDate, Utc};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
    pub joining_date: NaiveDate,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}
