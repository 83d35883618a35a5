//! The contract every persisted entity satisfies.

use serde::Serialize;
use uuid::Uuid;

use crate::types::audit::Audit;
use crate::types::filter::FilterValue;

/// A named uniqueness constraint and the value an entity holds for it.
///
/// Constraints apply among non-deleted rows only. Storage adapters that
/// cannot rely on database indexes compare these keys directly.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueKey {
    /// Constraint name, also used in conflict messages.
    pub name: &'static str,
    /// Normalized key value.
    pub value: String,
}

impl UniqueKey {
    /// Create a key.
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// An auditable, soft-deletable record stored in one table.
pub trait Entity: Clone + std::fmt::Debug + Serialize + Send + Sync + Unpin + 'static {
    /// Human readable name used in messages.
    const NAME: &'static str;
    /// Backing table.
    const TABLE: &'static str;
    /// Every column in storage order, audit columns first.
    const COLUMNS: &'static [&'static str];
    /// Relation names accepted as includes.
    const RELATIONS: &'static [&'static str] = &[];

    /// The audit block.
    fn audit(&self) -> &Audit;

    /// The audit block, mutably.
    fn audit_mut(&mut self) -> &mut Audit;

    /// Primary key.
    fn id(&self) -> Uuid {
        self.audit().id
    }

    /// Whether the row is soft-deleted.
    fn is_deleted(&self) -> bool {
        self.audit().is_deleted
    }

    /// Value of a column, or `None` for an unknown column name.
    fn field(&self, name: &str) -> Option<FilterValue>;

    /// Uniqueness constraints this row participates in.
    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }

    /// Whether `name` is a known column.
    fn has_column(name: &str) -> bool {
        Self::COLUMNS.contains(&name)
    }

    /// Whether `name` is a known relation.
    fn has_relation(name: &str) -> bool {
        Self::RELATIONS.contains(&name)
    }
}
