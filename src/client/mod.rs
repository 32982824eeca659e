//! Controllers behind the single-page employee client.
//!
//! [`DataController`] owns the fetched records and derives the visible list;
//! [`FormController`] edits one record. [`EmployeeScreen`] connects the two the way
//! the page does: a saved form triggers a re-fetch and leaves edit mode.

pub mod api;
pub mod controller;
pub mod error;
pub mod form;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use uuid::Uuid;

pub use api::{EmployeeApi, HttpEmployeeApi};
pub use controller::{DataController, ListStatus};
pub use error::ClientError;
pub use form::{FormController, PendingSubmit, SubmitOutcome, DEPARTMENTS};

pub struct EmployeeScreen {
    pub data: DataController,
    pub form: FormController,
}

impl EmployeeScreen {
    pub fn new(api: Arc<dyn EmployeeApi>) -> Self {
        Self {
            data: DataController::new(api.clone()),
            form: FormController::new(api),
        }
    }

    /// Initial fetch.
    pub async fn load(&mut self) -> error::Result<()> {
        self.data.refresh().await
    }

    pub fn heading(&self) -> &'static str {
        if self.data.editing().is_some() {
            "Edit Employee"
        } else {
            "Add New Employee"
        }
    }

    pub fn edit(&mut self, id: Uuid) -> bool {
        let employee = self.data.begin_edit(id);
        let found = employee.is_some();
        self.form.load(employee);
        found
    }

    pub fn cancel_edit(&mut self) {
        self.data.cancel_edit();
        self.form.load(None);
    }

    /// On success the list is re-fetched and the form returns to create mode.
    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let outcome = self.form.submit().await;
        if matches!(outcome, SubmitOutcome::Saved(_)) {
            // The save stands; a failed re-fetch shows up as the list error.
            if let Err(err) = self.data.form_submitted().await {
                log::warn!("Re-fetch after saving employee failed: {}", err);
            }
            self.form.load(None);
        }
        outcome
    }

    pub async fn delete(&mut self, id: Uuid) -> error::Result<()> {
        let was_editing = self.data.editing().map(|e| e.id) == Some(id);
        self.data.delete(id).await?;
        if was_editing {
            self.form.load(None);
        }
        Ok(())
    }
}
