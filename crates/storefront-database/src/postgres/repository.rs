//! Generic PostgreSQL repository.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use storefront_core::result::AppResult;
use storefront_core::traits::Repository;
use storefront_core::types::{Change, ChangeSet, PageRequest, PageResponse, QuerySpec};

use super::entity::PgEntity;
use super::query;
use crate::error::map_sqlx_error;

/// [`Repository`] implementation over one PostgreSQL table.
pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E> {
    /// Create a repository backed by `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for PgRepository<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

#[async_trait]
impl<E: PgEntity> Repository<E> for PgRepository<E> {
    async fn get_all(&self, spec: &QuerySpec) -> AppResult<Vec<E>> {
        spec.validate_for::<E>()?;
        let mut qb = query::select::<E>(spec)?;
        debug!(table = E::TABLE, sql = %qb.sql(), "Selecting rows");
        qb.build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("Failed to list {}", E::TABLE), e))
    }

    async fn find(&self, spec: &QuerySpec) -> AppResult<Option<E>> {
        spec.validate_for::<E>()?;
        let mut qb = query::select_first::<E>(spec)?;
        debug!(table = E::TABLE, sql = %qb.sql(), "Selecting first row");
        qb.build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("Failed to find {}", E::NAME), e))
    }

    async fn get_paged(&self, page: &PageRequest, spec: &QuerySpec) -> AppResult<PageResponse<E>> {
        let total = self.count(spec).await?;
        if page.offset() >= total {
            return Ok(PageResponse::new(Vec::new(), page.page, page.page_size, total));
        }

        let mut qb = query::select_page::<E>(spec, page)?;
        debug!(table = E::TABLE, sql = %qb.sql(), page = page.page, "Selecting page");
        let items = qb
            .build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("Failed to page {}", E::TABLE), e))?;

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn count(&self, spec: &QuerySpec) -> AppResult<u64> {
        spec.validate_for::<E>()?;
        let mut qb = query::count::<E>(spec)?;
        let total: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("Failed to count {}", E::TABLE), e))?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn save_changes(&self, changes: ChangeSet<E>) -> AppResult<u64> {
        if changes.is_empty() {
            return Ok(0);
        }

        let now = changes.now();
        let staged = changes.len();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("Failed to begin transaction", e))?;

        let mut affected = 0u64;
        for change in changes.into_changes() {
            let mut qb = match &change {
                Change::Insert(entity) => query::insert(entity),
                Change::Update(entity) => query::update(entity),
                Change::SoftDelete(id) => query::soft_delete::<E>(*id, now),
                Change::HardDelete(id) => query::hard_delete::<E>(*id),
                Change::SetActive(id, is_active) => query::set_active::<E>(*id, *is_active, now),
            };
            let result = qb
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error(&format!("Failed to write {}", E::NAME), e))?;
            affected += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("Failed to commit transaction", e))?;

        debug!(table = E::TABLE, staged, affected, "Change set committed");
        Ok(affected)
    }
}
