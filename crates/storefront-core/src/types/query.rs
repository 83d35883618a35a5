//! The `QuerySpec` value passed to repositories.
//!
//! A [`QuerySpec`] is plain data: a conjunction of filters, an ordered list
//! of sort keys, the relations a caller wants eager-loaded, and whether
//! soft-deleted rows should be visible. Each storage adapter evaluates it
//! in its own way; the soft-delete predicate is always conjoined unless
//! [`QuerySpec::with_deleted`] was requested.

use serde::{Deserialize, Serialize};

use super::filter::{FilterField, FilterOp, FilterValue};
use super::sorting::SortField;
use crate::error::AppError;
use crate::result::AppResult;
use crate::traits::entity::Entity;

/// Filter criteria, sort order, include list and deleted-row visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Conditions that must all hold.
    #[serde(default)]
    pub filters: Vec<FilterField>,
    /// Sort keys, most significant first.
    #[serde(default)]
    pub sort: Vec<SortField>,
    /// Relation names to eager-load.
    #[serde(default)]
    pub includes: Vec<String>,
    /// Whether soft-deleted rows are visible.
    #[serde(default)]
    pub include_deleted: bool,
}

impl QuerySpec {
    /// Matches every live row in natural order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter condition.
    pub fn filter(mut self, filter: FilterField) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a filter condition when `filter` is `Some`.
    pub fn filter_opt(self, filter: Option<FilterField>) -> Self {
        match filter {
            Some(filter) => self.filter(filter),
            None => self,
        }
    }

    /// Append a sort key.
    pub fn sort(mut self, sort: SortField) -> Self {
        self.sort.push(sort);
        self
    }

    /// Request a relation to be eager-loaded.
    pub fn include(mut self, relation: impl Into<String>) -> Self {
        self.includes.push(relation.into());
        self
    }

    /// Make soft-deleted rows visible.
    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    /// Whether `relation` was requested.
    pub fn includes(&self, relation: &str) -> bool {
        self.includes.iter().any(|r| r == relation)
    }

    /// Every field name referenced by a filter or sort key.
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.filters
            .iter()
            .map(|f| f.field.as_str())
            .chain(self.sort.iter().map(|s| s.field.as_str()))
    }

    /// Reject field names `E` does not have and operator/value mismatches.
    ///
    /// Adapters call this before evaluating a query, so only known column
    /// names ever reach generated SQL.
    pub fn validate_for<E: Entity>(&self) -> AppResult<()> {
        if let Some(field) = self.referenced_fields().find(|f| !E::has_column(f)) {
            return Err(AppError::validation(format!(
                "Unknown field '{field}' for {}",
                E::NAME
            )));
        }
        for filter in &self.filters {
            let is_list = matches!(filter.value, FilterValue::StringList(_));
            if (filter.op == FilterOp::In) != is_list {
                return Err(AppError::validation(format!(
                    "Operator '{:?}' cannot be used with value {:?} on field '{}'",
                    filter.op, filter.value, filter.field
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates() {
        let spec = QuerySpec::new()
            .filter(FilterField::eq("is_active", true))
            .filter_opt(None)
            .sort(SortField::desc("created_at"))
            .include("variants");

        assert_eq!(spec.filters.len(), 1);
        assert!(spec.includes("variants"));
        assert!(!spec.include_deleted);
        let fields: Vec<&str> = spec.referenced_fields().collect();
        assert_eq!(fields, vec!["is_active", "created_at"]);
    }
}
