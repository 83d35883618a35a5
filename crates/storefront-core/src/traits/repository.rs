//! Generic repository trait for entity persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;
use crate::traits::entity::Entity;
use crate::types::change_set::ChangeSet;
use crate::types::filter::FilterField;
use crate::types::pagination::{PageRequest, PageResponse};
use crate::types::query::QuerySpec;

/// Generic CRUD repository over one entity type.
///
/// Storage adapters implement the four query methods and
/// [`Repository::save_changes`]. Every write helper is a one-operation
/// change set. Soft-deleted rows are invisible unless the query spec
/// asks for them.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync + 'static {
    /// All rows matching `spec`, in the requested order.
    async fn get_all(&self, spec: &QuerySpec) -> AppResult<Vec<E>>;

    /// The first row matching `spec`.
    async fn find(&self, spec: &QuerySpec) -> AppResult<Option<E>>;

    /// One page of rows matching `spec`, with totals.
    async fn get_paged(&self, page: &PageRequest, spec: &QuerySpec)
    -> AppResult<PageResponse<E>>;

    /// Number of rows matching `spec`.
    async fn count(&self, spec: &QuerySpec) -> AppResult<u64>;

    /// Commit every staged change as one unit. Returns the affected row count.
    async fn save_changes(&self, changes: ChangeSet<E>) -> AppResult<u64>;

    /// Find a live row by primary key.
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<E>> {
        self.find(&QuerySpec::new().filter(FilterField::eq("id", id)))
            .await
    }

    /// Find a row by primary key, soft-deleted or not.
    async fn get_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<E>> {
        self.find(
            &QuerySpec::new()
                .filter(FilterField::eq("id", id))
                .with_deleted(),
        )
        .await
    }

    /// Whether any row matches `spec`.
    async fn exists(&self, spec: &QuerySpec) -> AppResult<bool> {
        Ok(self.count(spec).await? > 0)
    }

    /// Insert a row. Identity and timestamps are assigned when unset.
    async fn add(&self, entity: E) -> AppResult<E> {
        let mut changes = ChangeSet::new();
        let entity = changes.add(entity);
        self.save_changes(changes).await?;
        Ok(entity)
    }

    /// Insert several rows as one unit.
    async fn add_range(&self, entities: Vec<E>) -> AppResult<Vec<E>> {
        let mut changes = ChangeSet::new();
        let entities: Vec<E> = entities.into_iter().map(|e| changes.add(e)).collect();
        self.save_changes(changes).await?;
        Ok(entities)
    }

    /// Overwrite a live row. A missing row is a not-found error.
    async fn update(&self, entity: E) -> AppResult<E> {
        let mut changes = ChangeSet::new();
        let entity = changes.update(entity);
        let affected = self.save_changes(changes).await?;
        if affected == 0 {
            return Err(AppError::not_found(format!(
                "{} {} not found",
                E::NAME,
                entity.id()
            )));
        }
        Ok(entity)
    }

    /// Overwrite several rows as one unit.
    async fn update_range(&self, entities: Vec<E>) -> AppResult<u64> {
        let mut changes = ChangeSet::new();
        for entity in entities {
            changes.update(entity);
        }
        self.save_changes(changes).await
    }

    /// Mark a live row deleted. Returns `false` if nothing matched.
    async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.soft_delete_range(&[id]).await? > 0)
    }

    /// Mark several live rows deleted.
    async fn soft_delete_range(&self, ids: &[Uuid]) -> AppResult<u64> {
        let mut changes = ChangeSet::new();
        for id in ids {
            changes.soft_delete(*id);
        }
        self.save_changes(changes).await
    }

    /// Remove a row permanently, deleted or not.
    async fn hard_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.hard_delete_range(&[id]).await? > 0)
    }

    /// Remove several rows permanently.
    async fn hard_delete_range(&self, ids: &[Uuid]) -> AppResult<u64> {
        let mut changes = ChangeSet::new();
        for id in ids {
            changes.hard_delete(*id);
        }
        self.save_changes(changes).await
    }

    /// Set the active flag of a live row.
    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<bool> {
        let mut changes = ChangeSet::new();
        changes.set_active(id, is_active);
        Ok(self.save_changes(changes).await? > 0)
    }
}
