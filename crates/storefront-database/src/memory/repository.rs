//! Generic in-memory repository.
//!
//! Rows are kept in insertion order behind a `tokio::sync::RwLock`. Query
//! specs are evaluated with [`FilterField::matches`] against
//! [`Entity::field`], so filtering and soft-delete visibility follow the
//! same rules as the PostgreSQL adapter. A change set is applied to a copy
//! of the table and swapped in only when every change succeeded.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Entity, Repository};
use storefront_core::types::{
    Change, ChangeSet, FilterValue, PageRequest, PageResponse, QuerySpec, SortDirection,
};

/// [`Repository`] implementation holding rows in memory.
pub struct MemoryRepository<E> {
    rows: RwLock<Vec<E>>,
}

impl<E: Entity> MemoryRepository<E> {
    /// An empty table.
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// A table preloaded with `rows`, stored as given.
    pub fn with_rows(rows: Vec<E>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Every row, deleted or not, in insertion order.
    pub async fn snapshot(&self) -> Vec<E> {
        self.rows.read().await.clone()
    }

    fn matches(entity: &E, spec: &QuerySpec) -> bool {
        if !spec.include_deleted && entity.is_deleted() {
            return false;
        }
        spec.filters.iter().all(|filter| {
            entity
                .field(&filter.field)
                .is_some_and(|actual| filter.matches(&actual))
        })
    }

    fn query(rows: &[E], spec: &QuerySpec) -> Vec<E> {
        let mut found: Vec<E> = rows
            .iter()
            .filter(|e| Self::matches(e, spec))
            .cloned()
            .collect();
        if !spec.sort.is_empty() {
            // Stable sort keeps insertion order among equal keys.
            found.sort_by(|a, b| {
                spec.sort
                    .iter()
                    .map(|key| {
                        let ordering = compare_nulls_last(
                            &a.field(&key.field).unwrap_or(FilterValue::Null),
                            &b.field(&key.field).unwrap_or(FilterValue::Null),
                        );
                        match key.direction {
                            SortDirection::Asc => ordering,
                            SortDirection::Desc => ordering.reverse(),
                        }
                    })
                    .find(|o| *o != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }
        found
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ascending order with `NULL` after every value, as PostgreSQL sorts.
fn compare_nulls_last(a: &FilterValue, b: &FilterValue) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.compare(b).unwrap_or(Ordering::Equal),
    }
}

/// Fail if `entity` shares a unique key with another live row.
fn check_unique<E: Entity>(rows: &[E], entity: &E) -> AppResult<()> {
    if entity.is_deleted() {
        return Ok(());
    }
    for key in entity.unique_keys() {
        let clash = rows.iter().any(|other| {
            other.id() != entity.id()
                && !other.is_deleted()
                && other.unique_keys().iter().any(|k| *k == key)
        });
        if clash {
            return Err(AppError::conflict(format!(
                "{} with {} '{}' already exists",
                E::NAME,
                key.name,
                key.value
            )));
        }
    }
    Ok(())
}

fn live<E: Entity>(rows: &[E], id: Uuid) -> Option<usize> {
    rows.iter().position(|e| e.id() == id && !e.is_deleted())
}

fn apply<E: Entity>(rows: &mut Vec<E>, change: Change<E>, now: DateTime<Utc>) -> AppResult<u64> {
    match change {
        Change::Insert(entity) => {
            if rows.iter().any(|e| e.id() == entity.id()) {
                return Err(AppError::conflict(format!(
                    "{} {} already exists",
                    E::NAME,
                    entity.id()
                )));
            }
            check_unique(rows, &entity)?;
            rows.push(entity);
            Ok(1)
        }
        Change::Update(entity) => {
            let Some(index) = live(rows, entity.id()) else {
                return Ok(0);
            };
            check_unique(rows, &entity)?;
            rows[index] = entity;
            Ok(1)
        }
        Change::SoftDelete(id) => {
            let Some(index) = live(rows, id) else {
                return Ok(0);
            };
            let audit = rows[index].audit_mut();
            audit.is_deleted = true;
            audit.updated_at = now;
            Ok(1)
        }
        Change::HardDelete(id) => {
            let before = rows.len();
            rows.retain(|e| e.id() != id);
            Ok((before - rows.len()) as u64)
        }
        Change::SetActive(id, is_active) => {
            let Some(index) = live(rows, id) else {
                return Ok(0);
            };
            let audit = rows[index].audit_mut();
            audit.is_active = is_active;
            audit.updated_at = now;
            Ok(1)
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn get_all(&self, spec: &QuerySpec) -> AppResult<Vec<E>> {
        spec.validate_for::<E>()?;
        let rows = self.rows.read().await;
        Ok(Self::query(&rows, spec))
    }

    async fn find(&self, spec: &QuerySpec) -> AppResult<Option<E>> {
        spec.validate_for::<E>()?;
        let rows = self.rows.read().await;
        if spec.sort.is_empty() {
            return Ok(rows.iter().find(|e| Self::matches(e, spec)).cloned());
        }
        Ok(Self::query(&rows, spec).into_iter().next())
    }

    async fn get_paged(&self, page: &PageRequest, spec: &QuerySpec) -> AppResult<PageResponse<E>> {
        spec.validate_for::<E>()?;
        let rows = self.rows.read().await;
        let found = Self::query(&rows, spec);
        let total = found.len() as u64;
        let items = found
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn count(&self, spec: &QuerySpec) -> AppResult<u64> {
        spec.validate_for::<E>()?;
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|e| Self::matches(e, spec)).count() as u64)
    }

    async fn save_changes(&self, changes: ChangeSet<E>) -> AppResult<u64> {
        if changes.is_empty() {
            return Ok(0);
        }

        let now = changes.now();
        let mut rows = self.rows.write().await;
        let mut working = rows.clone();
        let mut affected = 0;
        for change in changes.into_changes() {
            affected += apply(&mut working, change, now)?;
        }
        *rows = working;

        debug!(entity = E::NAME, affected, "Change set applied");
        Ok(affected)
    }
}
