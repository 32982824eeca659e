//! In-process [`EmployeeApi`] for controller tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::api::EmployeeApi;
use super::error::{ClientError, Result};
use crate::db::{EmployeeStore, MemoryEmployeeStore, StoreError};
use crate::handlers::employee::{EMAIL_TAKEN, EMAIL_TAKEN_BY_OTHER, NOT_FOUND};
use crate::models::employee::Employee;
use crate::utils::validation::{validate_employee, EmployeeInput};

pub(crate) fn input(name: &str, email: &str) -> EmployeeInput {
    EmployeeInput {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        department: Some("Engineering".to_string()),
        joining_date: Some("2024-01-15".to_string()),
    }
}

fn api_error(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status,
        message: Some(message.to_string()),
    }
}

#[derive(Default)]
pub(crate) struct FakeApi {
    store: MemoryEmployeeStore,
    list_calls: AtomicUsize,
    /// `Some(message)` fails the next call; an inner `None` fails it without a body.
    next_failure: Mutex<Option<Option<String>>>,
    /// Fails only the next `list`, leaving mutations to succeed.
    next_list_failure: Mutex<Option<String>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn seed(&self, input: EmployeeInput) -> Employee {
        let fields = validate_employee(&input).expect("seed input is valid");
        self.store.insert(&fields).await.expect("seed email is unique")
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_next(&self, message: &str) {
        *self.next_failure.lock().unwrap() = Some(Some(message.to_string()));
    }

    pub(crate) fn fail_next_without_message(&self) {
        *self.next_failure.lock().unwrap() = Some(None);
    }

    pub(crate) fn fail_next_list(&self, message: &str) {
        *self.next_list_failure.lock().unwrap() = Some(message.to_string());
    }

    fn take_failure(&self) -> Result<()> {
        match self.next_failure.lock().unwrap().take() {
            Some(message) => Err(ClientError::Api { status: 500, message }),
            None => Ok(()),
        }
    }
}

fn internal(err: StoreError) -> ClientError {
    api_error(500, &err.to_string())
}

#[async_trait]
impl EmployeeApi for FakeApi {
    async fn list(&self) -> Result<Vec<Employee>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.next_list_failure.lock().unwrap().take() {
            return Err(api_error(500, &message));
        }
        self.take_failure()?;
        self.store.find_all().await.map_err(internal)
    }

    async fn get(&self, id: Uuid) -> Result<Employee> {
        self.take_failure()?;
        self.store
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| api_error(404, NOT_FOUND))
    }

    async fn create(&self, input: &EmployeeInput) -> Result<Employee> {
        self.take_failure()?;
        let fields = validate_employee(input).map_err(|errors| api_error(400, errors.server_message()))?;
        match self.store.insert(&fields).await {
            Err(StoreError::DuplicateEmail) => Err(api_error(400, EMAIL_TAKEN)),
            other => other.map_err(internal),
        }
    }

    async fn update(&self, id: Uuid, input: &EmployeeInput) -> Result<Employee> {
        self.take_failure()?;
        let fields = validate_employee(input).map_err(|errors| api_error(400, errors.server_message()))?;
        // Same order as the handler: the conflict is reported before a missing id.
        if self.store.find_by_email(&fields.email, Some(id)).await.map_err(internal)?.is_some() {
            return Err(api_error(400, EMAIL_TAKEN_BY_OTHER));
        }
        match self.store.replace(id, &fields).await {
            Ok(Some(employee)) => Ok(employee),
            Ok(None) => Err(api_error(404, NOT_FOUND)),
            Err(StoreError::DuplicateEmail) => Err(api_error(400, EMAIL_TAKEN_BY_OTHER)),
            Err(err) => Err(internal(err)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.take_failure()?;
        self.store
            .remove(id)
            .await
            .map_err(internal)?
            .map(|_| ())
            .ok_or_else(|| api_error(404, NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_reports_a_conflict_before_a_missing_id() {
        let api = FakeApi::new();
        api.seed(input("Ana Lima", "ana@example.com")).await;

        let err = api
            .update(Uuid::new_v4(), &input("Someone", "ana@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), EMAIL_TAKEN_BY_OTHER);

        let err = api
            .update(Uuid::new_v4(), &input("Someone", "someone@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), NOT_FOUND);
    }
}
