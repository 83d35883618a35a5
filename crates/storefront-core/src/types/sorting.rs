//! Sort keys for list queries, parsed from `field[:asc|desc]`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Ascending unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::validation(format!(
                "Invalid sort direction: '{s}'. Expected 'asc' or 'desc'"
            ))),
        }
    }
}

/// One key of an ordering; keys are applied most significant first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Must name a column of the queried entity.
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

impl FromStr for SortField {
    type Err = AppError;

    /// Parse `field`, `field:asc` or `field:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((field, dir)) if !field.is_empty() => Ok(Self::new(field, dir.parse()?)),
            None if !s.is_empty() => Ok(Self::asc(s)),
            _ => Err(AppError::validation(format!("Invalid sort expression: '{s}'"))),
        }
    }
}
