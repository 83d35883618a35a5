//! Generic CRUD service over one repository and one mapper.
//!
//! Every entity-specific service wraps a [`CrudService`] and layers its own
//! rules on top. Reads return DTOs; includes requested by the caller are
//! checked against [`Entity::RELATIONS`] and resolved by an [`Expand`]
//! implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;
use storefront_core::traits::{Entity, Mapper, Repository, Service};
use storefront_core::types::{PageRequest, PageResponse, QuerySpec};

use crate::context::RequestContext;

/// Loads requested relations into a read DTO.
#[async_trait]
pub trait Expand<M: Mapper>: Send + Sync + 'static {
    /// Fill the relations named in `includes`. Names are already validated.
    async fn expand(&self, read: &mut M::Read, entity: &M::Entity, includes: &[String])
    -> AppResult<()>;
}

/// Expander for entities without relations.
pub struct NoExpand;

#[async_trait]
impl<M: Mapper> Expand<M> for NoExpand {
    async fn expand(&self, _read: &mut M::Read, _entity: &M::Entity, _includes: &[String]) -> AppResult<()> {
        Ok(())
    }
}

/// DTO for mappers whose entity cannot be created or patched directly.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NoChanges;

impl Validate for NoChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

/// Reject relation names `E` does not declare.
pub fn check_includes<E: Entity>(includes: &[String]) -> AppResult<()> {
    match includes.iter().find(|name| !E::has_relation(name)) {
        Some(name) => Err(AppError::validation(format!(
            "Unknown include '{name}' for {}. Expected one of: {}",
            E::NAME,
            E::RELATIONS.join(", ")
        ))),
        None => Ok(()),
    }
}

/// CRUD operations for one entity type, speaking DTOs.
pub struct CrudService<M: Mapper> {
    /// Entity repository.
    repo: Arc<dyn Repository<M::Entity>>,
    /// Entity/DTO conversion.
    mapper: Arc<M>,
    /// Relation loader.
    expander: Arc<dyn Expand<M>>,
}

impl<M: Mapper> Clone for CrudService<M> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            mapper: Arc::clone(&self.mapper),
            expander: Arc::clone(&self.expander),
        }
    }
}

impl<M: Mapper> CrudService<M> {
    /// Creates a service with no relation loading.
    pub fn new(repo: Arc<dyn Repository<M::Entity>>, mapper: M) -> Self {
        Self {
            repo,
            mapper: Arc::new(mapper),
            expander: Arc::new(NoExpand),
        }
    }

    /// Attach a relation loader.
    pub fn with_expander(mut self, expander: impl Expand<M>) -> Self {
        self.expander = Arc::new(expander);
        self
    }

    /// The underlying repository.
    pub fn repository(&self) -> &Arc<dyn Repository<M::Entity>> {
        &self.repo
    }

    /// The mapper.
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Map an entity and load the requested relations.
    pub async fn to_read(&self, entity: &M::Entity, includes: &[String]) -> AppResult<M::Read> {
        let mut read = self.mapper.to_read(entity);
        if !includes.is_empty() {
            self.expander.expand(&mut read, entity, includes).await?;
        }
        Ok(read)
    }

    async fn to_reads(&self, entities: &[M::Entity], includes: &[String]) -> AppResult<Vec<M::Read>> {
        let mut reads = Vec::with_capacity(entities.len());
        for entity in entities {
            reads.push(self.to_read(entity, includes).await?);
        }
        Ok(reads)
    }

    /// Get one live entity by id.
    pub async fn get_by_id(&self, id: Uuid, includes: &[String]) -> AppResult<Option<M::Read>> {
        check_includes::<M::Entity>(includes)?;
        match self.repo.get_by_id(id).await? {
            Some(entity) => Ok(Some(self.to_read(&entity, includes).await?)),
            None => Ok(None),
        }
    }

    /// Every entity matching `spec`.
    pub async fn get_all(&self, spec: &QuerySpec) -> AppResult<Vec<M::Read>> {
        check_includes::<M::Entity>(&spec.includes)?;
        let entities = self.repo.get_all(spec).await?;
        self.to_reads(&entities, &spec.includes).await
    }

    /// The first entity matching `spec`.
    pub async fn find(&self, spec: &QuerySpec) -> AppResult<Option<M::Read>> {
        check_includes::<M::Entity>(&spec.includes)?;
        match self.repo.find(spec).await? {
            Some(entity) => Ok(Some(self.to_read(&entity, &spec.includes).await?)),
            None => Ok(None),
        }
    }

    /// One page of entities matching `spec`.
    pub async fn get_paged(&self, page: &PageRequest, spec: &QuerySpec) -> AppResult<PageResponse<M::Read>> {
        check_includes::<M::Entity>(&spec.includes)?;
        let entities = self.repo.get_paged(page, spec).await?;
        let items = self.to_reads(&entities.items, &spec.includes).await?;
        Ok(PageResponse::new(
            items,
            entities.page,
            entities.page_size,
            entities.total_items,
        ))
    }

    /// Number of entities matching `spec`.
    pub async fn count(&self, spec: &QuerySpec) -> AppResult<u64> {
        self.repo.count(spec).await
    }

    /// Whether any entity matches `spec`.
    pub async fn exists(&self, spec: &QuerySpec) -> AppResult<bool> {
        self.repo.exists(spec).await
    }

    /// Validate, map and persist a new entity.
    pub async fn create(&self, ctx: &RequestContext, dto: M::Create) -> AppResult<M::Read> {
        let entity = self.build(ctx, dto)?;
        self.insert(entity).await
    }

    /// Validate and map a create DTO without persisting it.
    pub fn build(&self, ctx: &RequestContext, dto: M::Create) -> AppResult<M::Entity> {
        dto.validate()?;
        self.mapper.from_create(dto, ctx.user_id)
    }

    /// Persist an already built entity.
    pub async fn insert(&self, entity: M::Entity) -> AppResult<M::Read> {
        let entity = self.repo.add(entity).await?;
        info!(entity = M::Entity::NAME, id = %entity.id(), "Created");
        Ok(self.mapper.to_read(&entity))
    }

    /// Apply the `Some` fields of `dto`. `None` when the id does not resolve.
    pub async fn update(&self, id: Uuid, dto: M::Update) -> AppResult<Option<M::Read>> {
        dto.validate()?;
        let Some(mut entity) = self.repo.get_by_id(id).await? else {
            return Ok(None);
        };
        self.mapper.apply_update(&mut entity, dto)?;
        self.save(entity).await
    }

    /// Persist a modified entity. `None` when the row vanished meanwhile.
    pub async fn save(&self, entity: M::Entity) -> AppResult<Option<M::Read>> {
        match self.repo.update(entity).await {
            Ok(entity) => {
                info!(entity = M::Entity::NAME, id = %entity.id(), "Updated");
                Ok(Some(self.mapper.to_read(&entity)))
            }
            Err(e) if e.is(ErrorKind::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Soft delete. `false` if nothing was deleted.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let deleted = self.repo.soft_delete(id).await?;
        if deleted {
            info!(entity = M::Entity::NAME, id = %id, "Soft-deleted");
        }
        Ok(deleted)
    }

    /// Permanently remove a row, deleted or not.
    pub async fn purge(&self, id: Uuid) -> AppResult<bool> {
        let purged = self.repo.hard_delete(id).await?;
        if purged {
            info!(entity = M::Entity::NAME, id = %id, "Purged");
        }
        Ok(purged)
    }

    /// Flip the active flag, independent of deletion.
    pub async fn set_active_status(&self, id: Uuid, is_active: bool) -> AppResult<bool> {
        let changed = self.repo.set_active(id, is_active).await?;
        if changed {
            info!(entity = M::Entity::NAME, id = %id, is_active, "Active status changed");
        }
        Ok(changed)
    }
}

impl<M: Mapper> Service for CrudService<M> {}
