use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::db::{EmployeeStore, StoreError};
use crate::errors::AppError;
use crate::utils::validation::{validate_employee, EmployeeFields, EmployeeInput};

pub const NOT_FOUND: &str = "Employee not found";
pub const EMAIL_TAKEN: &str = "Employee with this email already exists";
pub const EMAIL_TAKEN_BY_OTHER: &str = "Another employee with this email already exists";

/// An id that does not parse cannot name a stored record.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(NOT_FOUND.to_string()))
}

fn store_failure(context: &'static str) -> impl Fn(StoreError) -> AppError {
    move |err| {
        log::error!("{}: {}", context, err);
        AppError::InternalServerError(context.to_string())
    }
}

fn validate_payload(payload: &EmployeeInput) -> Result<EmployeeFields, AppError> {
    validate_employee(payload).map_err(|errors| AppError::BadRequest(errors.server_message().to_string()))
}

pub async fn get_employees(store: web::Data<dyn EmployeeStore>) -> Result<HttpResponse, AppError> {
    let employees = store
        .find_all()
        .await
        .map_err(store_failure("Failed to fetch employees"))?;

    Ok(HttpResponse::Ok().json(employees))
}

pub async fn get_employee(
    store: web::Data<dyn EmployeeStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;

    let employee = store
        .find_by_id(id)
        .await
        .map_err(store_failure("Failed to fetch employee"))?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(employee))
}

pub async fn create_employee(
    store: web::Data<dyn EmployeeStore>,
    new_employee: web::Json<EmployeeInput>,
) -> Result<HttpResponse, AppError> {
    const FAILED: &str = "Failed to create employee";

    let fields = validate_payload(&new_employee)?;

    if store
        .find_by_email(&fields.email, None)
        .await
        .map_err(store_failure(FAILED))?
        .is_some()
    {
        return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
    }

    match store.insert(&fields).await {
        Ok(employee) => {
            log::info!("Created employee {}", employee.id);
            Ok(HttpResponse::Created().json(employee))
        }
        Err(StoreError::DuplicateEmail) => {
            log::warn!("Unique constraint rejected insert of {}", fields.email);
            Err(AppError::Conflict(EMAIL_TAKEN.to_string()))
        }
        Err(err) => Err(store_failure(FAILED)(err)),
    }
}

pub async fn update_employee(
    store: web::Data<dyn EmployeeStore>,
    id: web::Path<String>,
    updates: web::Json<EmployeeInput>,
) -> Result<HttpResponse, AppError> {
    const FAILED: &str = "Failed to update employee";

    let fields = validate_payload(&updates)?;
    let id = parse_id(&id)?;

    if store
        .find_by_email(&fields.email, Some(id))
        .await
        .map_err(store_failure(FAILED))?
        .is_some()
    {
        return Err(AppError::Conflict(EMAIL_TAKEN_BY_OTHER.to_string()));
    }

    match store.replace(id, &fields).await {
        Ok(Some(employee)) => Ok(HttpResponse::Ok().json(employee)),
        Ok(None) => Err(AppError::NotFound(NOT_FOUND.to_string())),
        Err(StoreError::DuplicateEmail) => {
            log::warn!("Unique constraint rejected update of {} to {}", id, fields.email);
            Err(AppError::Conflict(EMAIL_TAKEN_BY_OTHER.to_string()))
        }
        Err(err) => Err(store_failure(FAILED)(err)),
    }
}

pub async fn delete_employee(
    store: web::Data<dyn EmployeeStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;

    store
        .remove(id)
        .await
        .map_err(store_failure("Failed to delete employee"))?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    log::info!("Deleted employee {}", id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully",
    })))
}
