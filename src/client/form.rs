use std::sync::Arc;

use uuid::Uuid;

use super::api::EmployeeApi;
use super::error::Result;
use crate::models::employee::Employee;
use crate::utils::validation::{validate_employee, EmployeeInput, Field, FieldErrors};

/// Choices offered by the department picker. Display only; the form just requires a value.
pub const DEPARTMENTS: [&str; 7] = [
    "Engineering",
    "Marketing",
    "Sales",
    "Human Resources",
    "Finance",
    "Operations",
    "Customer Support",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub department: String,
    /// `YYYY-MM-DD`, as a date input produces it.
    pub joining_date: String,
}

impl FormData {
    fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
            joining_date: employee.joining_date.format("%Y-%m-%d").to_string(),
        }
    }

    fn to_input(&self) -> EmployeeInput {
        EmployeeInput {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            department: Some(self.department.clone()),
            joining_date: Some(self.joining_date.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    Saved(Employee),
    /// The request failed; see [`FormController::submit_error`].
    Failed,
    /// A submission is already in flight; nothing was sent.
    Busy,
}

/// A validated request taken off the form. Awaiting it does not borrow the form.
pub struct PendingSubmit {
    api: Arc<dyn EmployeeApi>,
    editing: Option<Uuid>,
    input: EmployeeInput,
}

impl PendingSubmit {
    pub async fn send(self) -> Result<Employee> {
        match self.editing {
            Some(id) => self.api.update(id, &self.input).await,
            None => self.api.create(&self.input).await,
        }
    }
}

/// Collects one record's fields and submits them as a create or an update.
pub struct FormController {
    api: Arc<dyn EmployeeApi>,
    data: FormData,
    field_errors: FieldErrors,
    submit_error: Option<String>,
    editing: Option<Uuid>,
    is_submitting: bool,
}

impl FormController {
    pub fn new(api: Arc<dyn EmployeeApi>) -> Self {
        Self {
            api,
            data: FormData::default(),
            field_errors: FieldErrors::default(),
            submit_error: None,
            editing: None,
            is_submitting: false,
        }
    }

    /// `Some` switches to edit mode with the record's values; `None` to an empty create form.
    pub fn load(&mut self, employee: Option<&Employee>) {
        self.data = employee.map(FormData::from_employee).unwrap_or_default();
        self.editing = employee.map(|e| e.id);
        self.field_errors = FieldErrors::default();
        self.submit_error = None;
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.data.name = value,
            Field::Email => self.data.email = value,
            Field::Department => self.data.department = value,
            Field::JoiningDate => self.data.joining_date = value,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting {
            "Saving..."
        } else if self.is_editing() {
            "Update Employee"
        } else {
            "Add Employee"
        }
    }

    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.field_errors.form_message(field)
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Runs every check at once and replaces all shown errors with the result.
    pub fn validate(&mut self) -> bool {
        self.submit_error = None;
        self.field_errors = validate_employee(&self.data.to_input()).err().unwrap_or_default();
        self.field_errors.is_empty()
    }

    /// Validates and marks the form as submitting. Rejected while a submission is in flight.
    pub fn begin_submit(&mut self) -> std::result::Result<PendingSubmit, SubmitOutcome> {
        if self.is_submitting {
            return Err(SubmitOutcome::Busy);
        }
        if !self.validate() {
            return Err(SubmitOutcome::Invalid);
        }

        self.is_submitting = true;
        Ok(PendingSubmit {
            api: self.api.clone(),
            editing: self.editing,
            input: self.data.to_input(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<Employee>) -> SubmitOutcome {
        self.is_submitting = false;

        match result {
            Ok(employee) => {
                if self.editing.is_none() {
                    self.data = FormData::default();
                }
                SubmitOutcome::Saved(employee)
            }
            Err(err) => {
                log::warn!("Saving employee failed: {}", err);
                self.submit_error = Some(err.user_message());
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        match self.begin_submit() {
            Ok(pending) => {
                let result = pending.send().await;
                self.finish_submit(result)
            }
            Err(outcome) => outcome,
        }
    }
}
