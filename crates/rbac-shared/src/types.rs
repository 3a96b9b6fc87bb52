//! Common types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

pub type EntityId = Uuid;

pub fn new_id() -> EntityId {
    Uuid::new_v4()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: DEFAULT_PAGE_SIZE }
    }
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn next(self) -> Self {
        Self { page: self.page + 1, ..self }
    }

    pub fn prev(self) -> Self {
        Self { page: self.page.saturating_sub(1).max(1), ..self }
    }
}

/// One page of an already-fetched list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: usize,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Client-side pagination. A page past the end is clamped to the last page.
pub fn paginate<T: Clone>(items: &[T], pagination: Pagination) -> Page<T> {
    let per_page = pagination.per_page.clamp(1, MAX_PAGE_SIZE);
    let total = items.len();
    let total_pages = (total.div_ceil(per_page as usize) as u32).max(1);
    let page = pagination.page.clamp(1, total_pages);
    let start = (page as usize - 1) * per_page as usize;
    let end = (start + per_page as usize).min(total);

    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        per_page,
        total,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_middle_page() {
        let items: Vec<u32> = (1..=45).collect();
        let page = paginate(&items, Pagination::new(2, 20));
        assert_eq!(page.items.first(), Some(&21));
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn test_paginate_clamps_past_end() {
        let items: Vec<u32> = (1..=45).collect();
        let page = paginate(&items, Pagination::new(9, 20));
        assert_eq!(page.page, 3);
        assert_eq!(page.items, vec![41, 42, 43, 44, 45]);
        assert!(!page.has_next());
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate::<u32>(&[], Pagination::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }
}
