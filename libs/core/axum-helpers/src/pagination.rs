//! Page/size/sort request handling and the paged response envelope.
//!
//! Query shape: `?page=0&size=20&sort=name,desc&sort=id`. Pages are
//! zero-based. Each `sort` entry names one or more fields, optionally
//! followed by a direction that applies to all of them.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 2000;
/// Postgres binds OFFSET as a signed 64-bit integer.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl From<SortDirection> for sea_orm::Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => sea_orm::Order::Asc,
            SortDirection::Desc => sea_orm::Order::Desc,
        }
    }
}

impl SortDirection {
    /// Applies this direction to an ascending comparison.
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> SortOrder<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Raw pagination parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Zero-based page index (default 0)
    pub page: Option<u64>,
    /// Page size (default 20, capped at 2000)
    pub size: Option<u64>,
    /// Sort entries such as `name,desc`; repeatable
    #[serde(default)]
    pub sort: Vec<String>,
}

/// Resolved pagination with typed sort fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable<F> {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder<F>>,
}

impl<F> Pageable<F> {
    pub fn new(page: u64, size: u64, sort: Vec<SortOrder<F>>) -> Self {
        Self {
            page,
            size: normalize_size(Some(size)),
            sort,
        }
    }

    /// Rows to skip, clamped to the largest offset Postgres accepts.
    ///
    /// A page past the end of the data is empty, however large it is.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size).min(MAX_OFFSET)
    }
}

impl<F: Default> Default for Pageable<F> {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: vec![SortOrder::asc(F::default())],
        }
    }
}

fn normalize_size(size: Option<u64>) -> u64 {
    match size {
        None | Some(0) => DEFAULT_PAGE_SIZE,
        Some(size) => size.min(MAX_PAGE_SIZE),
    }
}

impl PageRequest {
    /// Resolves raw parameters against the sortable fields `F`.
    ///
    /// `F::default()` is the fallback sort when none is given. An unknown
    /// field name is a bad request.
    pub fn resolve<F>(&self) -> Result<Pageable<F>, AppError>
    where
        F: FromStr + Default,
    {
        let mut sort = Vec::new();
        for entry in &self.sort {
            sort.extend(parse_sort_entry::<F>(entry)?);
        }
        if sort.is_empty() {
            sort.push(SortOrder::asc(F::default()));
        }

        Ok(Pageable {
            page: self.page.unwrap_or(0),
            size: normalize_size(self.size),
            sort,
        })
    }
}

fn parse_sort_entry<F: FromStr>(entry: &str) -> Result<Vec<SortOrder<F>>, AppError> {
    let mut tokens: Vec<&str> = entry
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    let direction = match tokens.last() {
        Some(last) if tokens.len() > 1 => match last.parse::<SortDirection>() {
            Ok(direction) => {
                tokens.pop();
                direction
            }
            Err(()) => SortDirection::Asc,
        },
        _ => SortDirection::Asc,
    };

    tokens
        .into_iter()
        .map(|token| {
            token
                .parse::<F>()
                .map(|field| SortOrder { field, direction })
                .map_err(|_| AppError::BadRequest(format!("Invalid sort property: {token}")))
        })
        .collect()
}

/// One page of results plus the totals needed to navigate the rest.
///
/// ```json
/// { "content": [], "number": 0, "size": 20, "totalElements": 0, "totalPages": 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page number
    #[serde(rename = "number", alias = "page")]
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }

    /// Cuts the requested page out of an already sorted collection.
    pub fn from_sorted<F>(items: Vec<T>, pageable: &Pageable<F>) -> Self {
        let total = items.len() as u64;
        let content = items
            .into_iter()
            .skip(usize::try_from(pageable.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(pageable.size).unwrap_or(usize::MAX))
            .collect();
        Self::new(content, pageable.page, pageable.size, total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
