//! Query options for collection-valued relations.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("ASC"),
            SortOrder::Desc => f.write_str("DESC"),
        }
    }
}

/// One `(field, direction)` sort criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub path: String,
    pub order: Option<SortOrder>,
}

impl Sort {
    pub fn asc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            order: Some(SortOrder::Asc),
        }
    }

    pub fn desc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            order: Some(SortOrder::Desc),
        }
    }

    /// The `sort` query value, e.g. `name,ASC`.
    pub fn to_param(&self) -> String {
        match self.order {
            Some(order) => format!("{},{}", self.path, order),
            None => self.path.clone(),
        }
    }
}

/// Page size, sort order and extra query parameters for a collection request.
///
/// Unset fields produce no query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HalOptions {
    pub size: Option<u32>,
    pub sort: Vec<Sort>,
    pub params: Vec<(String, String)>,
}

impl HalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort.push(sort);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }
}
