//! Pending mutations committed together by a repository.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::traits::entity::Entity;

/// One pending mutation.
#[derive(Debug, Clone)]
pub enum Change<E> {
    /// Insert a new row.
    Insert(E),
    /// Overwrite an existing row with this state.
    Update(E),
    /// Flip the deletion flag of a live row.
    SoftDelete(Uuid),
    /// Remove the row permanently.
    HardDelete(Uuid),
    /// Set the active flag of a live row.
    SetActive(Uuid, bool),
}

/// An ordered batch of mutations for one entity type.
///
/// `save_changes` applies the whole batch as a single unit and reports the
/// number of affected rows.
#[derive(Debug, Clone)]
pub struct ChangeSet<E> {
    changes: Vec<Change<E>>,
    now: DateTime<Utc>,
}

impl<E: Entity> ChangeSet<E> {
    /// An empty change set stamped with the current time.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// An empty change set using `now` for every audit timestamp.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            changes: Vec::new(),
            now,
        }
    }

    /// Stage an insert. Returns the entity with identity and timestamps assigned.
    pub fn add(&mut self, mut entity: E) -> E {
        entity.audit_mut().stamp_new(self.now);
        self.changes.push(Change::Insert(entity.clone()));
        entity
    }

    /// Stage an update. Returns the entity with `updated_at` bumped.
    pub fn update(&mut self, mut entity: E) -> E {
        entity.audit_mut().updated_at = self.now;
        self.changes.push(Change::Update(entity.clone()));
        entity
    }

    /// Stage a soft delete.
    pub fn soft_delete(&mut self, id: Uuid) {
        self.changes.push(Change::SoftDelete(id));
    }

    /// Stage a hard delete.
    pub fn hard_delete(&mut self, id: Uuid) {
        self.changes.push(Change::HardDelete(id));
    }

    /// Stage an active-flag change.
    pub fn set_active(&mut self, id: Uuid, is_active: bool) {
        self.changes.push(Change::SetActive(id, is_active));
    }

    /// The timestamp written into `updated_at` by every change.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Number of staged changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Staged changes in order.
    pub fn changes(&self) -> &[Change<E>] {
        &self.changes
    }

    /// Consume the set, yielding staged changes in order.
    pub fn into_changes(self) -> Vec<Change<E>> {
        self.changes
    }
}

impl<E: Entity> Default for ChangeSet<E> {
    fn default() -> Self {
        Self::new()
    }
}
