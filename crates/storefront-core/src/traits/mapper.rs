//! Explicit entity/DTO conversion.

use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::result::AppResult;
use crate::traits::entity::Entity;

/// Converts between one entity type and its read, create and update DTOs.
///
/// Mappers are plain values handed to the services that need them; there
/// is no global registry.
pub trait Mapper: Send + Sync + 'static {
    /// The persisted entity.
    type Entity: Entity;
    /// Outbound shape.
    type Read: Serialize + Send + Sync + 'static;
    /// Inbound shape for creation.
    type Create: Validate + Send + Sync + 'static;
    /// Inbound shape for partial updates. `None` fields are left untouched.
    type Update: Validate + Send + Sync + 'static;

    /// Project an entity to its read DTO.
    fn to_read(&self, entity: &Self::Entity) -> Self::Read;

    /// Build a new, unsaved entity from a create DTO.
    fn from_create(&self, dto: Self::Create, created_by: Option<Uuid>) -> AppResult<Self::Entity>;

    /// Apply the `Some` fields of an update DTO.
    fn apply_update(&self, entity: &mut Self::Entity, dto: Self::Update) -> AppResult<()>;
}
