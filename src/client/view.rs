//! Pure derivations from the fetched record set to what is rendered.
//!
//! Nothing here is cached: callers recompute from the full set on every change.

use crate::models::employee::Employee;

pub const PAGE_SIZE: usize = 5;

/// Case-insensitive substring match on `name`. A blank term keeps every record.
pub fn filter_by_name<'a>(records: &'a [Employee], term: &str) -> Vec<&'a Employee> {
    if term.trim().is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|employee| employee.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Records `[(page - 1) * page_size, page * page_size)`; pages are 1-indexed.
pub fn page_slice<T>(records: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(records.len());
    let end = start.saturating_add(page_size).min(records.len());
    &records[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControl {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub number: usize,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub previous: NavControl,
    pub pages: Vec<PageControl>,
    pub next: NavControl,
}

/// `None` when everything fits on one page: no control is rendered at all.
pub fn pagination(count: usize, current: usize, page_size: usize) -> Option<PaginationView> {
    let total = total_pages(count, page_size);
    if total <= 1 {
        return None;
    }

    Some(PaginationView {
        previous: NavControl { enabled: current > 1 },
        pages: (1..=total)
            .map(|number| PageControl {
                number,
                is_current: number == current,
            })
            .collect(),
        next: NavControl { enabled: current < total },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn employee(name: &str) -> Employee {
        let now = Utc::now();
        Employee {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            department: "Sales".to_string(),
            joining_date: NaiveDate::from_ymd_opt(2022, 1, 10).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn filter_matches_name_case_insensitively() {
        let records: Vec<Employee> = [
            "Ana Lima", "Bob Stone", "Juliana Reis", "Carl Poe", "Dana Wu", "Eve Hart", "Frank Ode",
        ]
        .iter()
        .map(|n| employee(n))
        .collect();

        let names: Vec<&str> = filter_by_name(&records, "ANA")
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ana Lima", "Juliana Reis", "Dana Wu"]);
    }

    #[test]
    fn filter_ignores_email_and_department() {
        let records = vec![employee("Bob Stone")];
        assert!(filter_by_name(&records, "example").is_empty());
        assert!(filter_by_name(&records, "sales").is_empty());
    }

    #[test]
    fn whitespace_term_keeps_everything() {
        let records = vec![employee("Ana"), employee("Bob")];
        assert_eq!(filter_by_name(&records, "   ").len(), 2);
    }

    #[test]
    fn pages_slice_the_filtered_set() {
        let records: Vec<usize> = (1..=12).collect();
        assert_eq!(page_slice(&records, 1, PAGE_SIZE), &[1, 2, 3, 4, 5]);
        assert_eq!(page_slice(&records, 3, PAGE_SIZE), &[11, 12]);
        assert!(page_slice(&records, 4, PAGE_SIZE).is_empty());
    }

    #[test]
    fn pagination_has_one_control_per_page() {
        let view = pagination(12, 1, PAGE_SIZE).unwrap();
        let numbers: Vec<usize> = view.pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(view.pages[0].is_current);
        assert!(!view.previous.enabled);
        assert!(view.next.enabled);

        let last = pagination(12, 3, PAGE_SIZE).unwrap();
        assert!(last.previous.enabled);
        assert!(!last.next.enabled);
        assert!(last.pages[2].is_current);
    }

    #[test]
    fn single_page_renders_no_pagination() {
        assert_eq!(pagination(5, 1, PAGE_SIZE), None);
        assert_eq!(pagination(0, 1, PAGE_SIZE), None);
        assert!(pagination(6, 1, PAGE_SIZE).is_some());
    }
}
