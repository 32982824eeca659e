use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EmployeeStore, StoreError};
use crate::models::employee::Employee;
use crate::utils::validation::EmployeeFields;

/// Process-local store. Records are kept in insertion order; uniqueness is checked and
/// written under one write lock.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    records: RwLock<Vec<Employee>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn email_taken(records: &[Employee], email: &str, excluding: Option<Uuid>) -> bool {
    records
        .iter()
        .any(|e| e.email == email && Some(e.id) != excluding)
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        let mut employees: Vec<Employee> = self.records.read().await.iter().rev().cloned().collect();
        // Stable: equal timestamps stay newest-inserted first.
        employees.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(employees)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
        Ok(self.records.read().await.iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str, excluding: Option<Uuid>) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|e| e.email == email && Some(e.id) != excluding)
            .cloned())
    }

    async fn insert(&self, fields: &EmployeeFields) -> Result<Employee, StoreError> {
        let mut records = self.records.write().await;
        if email_taken(&records, &fields.email, None) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            name: fields.name.clone(),
            email: fields.email.clone(),
            department: fields.department.clone(),
            joining_date: fields.joining_date,
            created_at: now,
            updated_at: now,
        };
        records.push(employee.clone());
        Ok(employee)
    }

    async fn replace(&self, id: Uuid, fields: &EmployeeFields) -> Result<Option<Employee>, StoreError> {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        if email_taken(&records, &fields.email, Some(id)) {
            return Err(StoreError::DuplicateEmail);
        }

        let employee = &mut records[index];
        employee.name = fields.name.clone();
        employee.email = fields.email.clone();
        employee.department = fields.department.clone();
        employee.joining_date = fields.joining_date;
        employee.updated_at = Utc::now();
        Ok(Some(employee.clone()))
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
        let mut records = self.records.write().await;
        Ok(records
            .iter()
            .position(|e| e.id == id)
            .map(|index| records.remove(index)))
    }
}
