//! Common types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("page number must not be negative (got {0})")]
    NegativePage(i64),

    #[error("page size must be between 1 and {max} (got {size})")]
    SizeOutOfRange { size: i64, max: u32 },
}

/// Zero-based page selector. Construct through [`PageRequest::new`] so the
/// bounds are always checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u64,
    size: u32,
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Result<Self, PageRequestError> {
        Self::with_max_size(page, size, MAX_PAGE_SIZE)
    }

    pub fn with_max_size(page: i64, size: i64, max_size: u32) -> Result<Self, PageRequestError> {
        if page < 0 {
            return Err(PageRequestError::NegativePage(page));
        }
        if size < 1 || size > i64::from(max_size) {
            return Err(PageRequestError::SizeOutOfRange { size, max: max_size });
        }
        Ok(Self { page: page as u64, size: size as u32 })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        // saturates for absurd page numbers; such a page is simply empty
        self.page.saturating_mul(u64::from(self.size))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: DEFAULT_PAGE_SIZE }
    }
}

/// A slice of an ordered result set plus the number of rows matching before
/// slicing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page_number: u64,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, request: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            page_number: request.page(),
            page_size: request.size(),
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.page_size))
    }

    pub fn has_next(&self) -> bool {
        self.page_number.saturating_add(1) < self.total_pages()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}
