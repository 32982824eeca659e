use std::sync::Arc;

use uuid::Uuid;

use super::api::EmployeeApi;
use super::error::Result;
use super::view::{self, PaginationView, PAGE_SIZE};
use crate::models::employee::Employee;

/// What the list area shows, in order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus<'a> {
    Loading,
    Error(&'a str),
    /// Nothing matches: "No employees found".
    Empty,
    Ready,
}

/// Holds the full fetched record set; every rendered list is derived from it.
pub struct DataController {
    api: Arc<dyn EmployeeApi>,
    employees: Vec<Employee>,
    search_term: String,
    current_page: usize,
    is_loading: bool,
    error: Option<String>,
    editing: Option<Employee>,
}

impl DataController {
    /// Starts in the loading state; call [`refresh`](Self::refresh) to fetch.
    pub fn new(api: Arc<dyn EmployeeApi>) -> Self {
        Self {
            api,
            employees: Vec::new(),
            search_term: String::new(),
            current_page: 1,
            is_loading: true,
            error: None,
            editing: None,
        }
    }

    /// Replaces the record set with a fresh fetch. On failure the previous set is kept.
    pub async fn refresh(&mut self) -> Result<()> {
        self.is_loading = true;
        let result = self.api.list().await;
        self.is_loading = false;

        match result {
            Ok(employees) => {
                self.employees = employees;
                self.error = None;
                self.current_page = 1;
                Ok(())
            }
            Err(err) => {
                log::warn!("Fetching employees failed: {}", err);
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn filtered(&self) -> Vec<&Employee> {
        view::filter_by_name(&self.employees, &self.search_term)
    }

    pub fn total_pages(&self) -> usize {
        view::total_pages(self.filtered().len(), PAGE_SIZE)
    }

    /// The current page of the filtered set.
    pub fn visible(&self) -> Vec<&Employee> {
        let filtered = self.filtered();
        view::page_slice(&filtered, self.current_page, PAGE_SIZE).to_vec()
    }

    pub fn pagination(&self) -> Option<PaginationView> {
        view::pagination(self.filtered().len(), self.current_page, PAGE_SIZE)
    }

    /// Clamped into `1..=total_pages`.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn previous_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
        }
    }

    pub fn status(&self) -> ListStatus<'_> {
        if self.is_loading {
            ListStatus::Loading
        } else if let Some(error) = &self.error {
            ListStatus::Error(error)
        } else if self.filtered().is_empty() {
            ListStatus::Empty
        } else {
            ListStatus::Ready
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        if let Err(err) = self.api.delete(id).await {
            log::warn!("Deleting employee {} failed: {}", id, err);
            self.error = Some(err.user_message());
            return Err(err);
        }
        if self.editing.as_ref().map(|e| e.id) == Some(id) {
            self.editing = None;
        }
        self.refresh().await
    }

    /// Puts a record from the current set into edit mode. Unknown ids are ignored.
    pub fn begin_edit(&mut self, id: Uuid) -> Option<&Employee> {
        self.editing = self.employees.iter().find(|e| e.id == id).cloned();
        self.editing.as_ref()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&Employee> {
        self.editing.as_ref()
    }

    /// Called after the form saved a record.
    pub async fn form_submitted(&mut self) -> Result<()> {
        self.editing = None;
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{input, FakeApi};

    async fn seeded(names: &[&str]) -> (Arc<FakeApi>, DataController) {
        let api = Arc::new(FakeApi::new());
        for (i, name) in names.iter().enumerate() {
            api.seed(input(name, &format!("user{}@example.com", i))).await;
        }
        let mut controller = DataController::new(api.clone());
        controller.refresh().await.unwrap();
        (api, controller)
    }

    #[tokio::test]
    async fn starts_loading_and_is_ready_after_fetch() {
        let api = Arc::new(FakeApi::new());
        let mut controller = DataController::new(api.clone());
        assert_eq!(controller.status(), ListStatus::Loading);

        controller.refresh().await.unwrap();
        assert_eq!(controller.status(), ListStatus::Empty);
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn search_narrows_and_resets_the_page() {
        let (_api, mut controller) = seeded(&[
            "Ana Lima", "Bob Stone", "Juliana Reis", "Carl Poe", "Dana Wu", "Eve Hart", "Frank Ode",
        ])
        .await;

        controller.go_to_page(2);
        assert_eq!(controller.current_page(), 2);

        controller.set_search_term("ANA");
        assert_eq!(controller.current_page(), 1);
        assert_eq!(controller.filtered().len(), 3);
        assert_eq!(controller.pagination(), None);
    }

    #[tokio::test]
    async fn twelve_records_span_three_pages() {
        let names: Vec<String> = (1..=12).map(|i| format!("Employee {:02}", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let (_api, mut controller) = seeded(&names).await;

        // Newest first, so page 1 holds the last five created.
        let page: Vec<&str> = controller.visible().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(page, vec!["Employee 12", "Employee 11", "Employee 10", "Employee 09", "Employee 08"]);

        controller.go_to_page(3);
        let page: Vec<&str> = controller.visible().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(page, vec!["Employee 02", "Employee 01"]);

        assert_eq!(controller.pagination().unwrap().pages.len(), 3);
        controller.go_to_page(4);
        assert_eq!(controller.current_page(), 3);
        controller.next_page();
        assert_eq!(controller.current_page(), 3);
    }

    #[tokio::test]
    async fn previous_page_stops_at_the_first_page() {
        let names: Vec<String> = (1..=6).map(|i| format!("Employee {}", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let (_api, mut controller) = seeded(&names).await;

        controller.next_page();
        assert_eq!(controller.current_page(), 2);
        controller.previous_page();
        controller.previous_page();
        assert_eq!(controller.current_page(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_previous_set() {
        let (api, mut controller) = seeded(&["Ana Lima"]).await;

        api.fail_next("Failed to fetch employees");
        assert!(controller.refresh().await.is_err());
        assert_eq!(controller.status(), ListStatus::Error("Failed to fetch employees"));
        assert_eq!(controller.employees().len(), 1);

        controller.refresh().await.unwrap();
        assert_eq!(controller.status(), ListStatus::Ready);
    }

    #[tokio::test]
    async fn delete_refetches_and_leaves_edit_mode() {
        let (api, mut controller) = seeded(&["Ana Lima", "Bob Stone"]).await;
        let id = controller.employees()[0].id;
        controller.begin_edit(id);

        controller.delete(id).await.unwrap();
        assert_eq!(controller.employees().len(), 1);
        assert!(controller.editing().is_none());
        assert_eq!(api.list_calls(), 2);
    }

    #[tokio::test]
    async fn refresh_resets_the_page() {
        let names: Vec<String> = (1..=7).map(|i| format!("Employee {}", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let (_api, mut controller) = seeded(&names).await;

        controller.go_to_page(2);
        controller.refresh().await.unwrap();
        assert_eq!(controller.current_page(), 1);
    }

    #[tokio::test]
    async fn begin_edit_ignores_unknown_ids() {
        let (_api, mut controller) = seeded(&["Ana Lima"]).await;
        assert!(controller.begin_edit(Uuid::new_v4()).is_none());

        let id = controller.employees()[0].id;
        assert_eq!(controller.begin_edit(id).map(|e| e.id), Some(id));
        controller.cancel_edit();
        assert!(controller.editing().is_none());
    }
}
