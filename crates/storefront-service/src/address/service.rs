//! Address book operations.
//!
//! Every user with at least one address has exactly one default. Changes to
//! the default are written as one change set that clears the old default
//! before setting the new one.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Mapper, Repository, Service};
use storefront_core::types::{ChangeSet, FilterField, QuerySpec, SortField};
use storefront_entity::address::Address;
use storefront_entity::user::User;

use super::dto::{AddressResponse, CreateAddressRequest, UpdateAddressRequest};
use super::mapper::AddressMapper;
use crate::context::RequestContext;
use crate::crud::CrudService;

/// Manages users' shipping addresses.
#[derive(Clone)]
pub struct AddressService {
    /// Generic CRUD over addresses.
    crud: CrudService<AddressMapper>,
    users: Arc<dyn Repository<User>>,
}

impl AddressService {
    /// Creates a new address service.
    pub fn new(addresses: Arc<dyn Repository<Address>>, users: Arc<dyn Repository<User>>) -> Self {
        Self {
            crud: CrudService::new(addresses, AddressMapper),
            users,
        }
    }

    /// Generic CRUD operations.
    pub fn crud(&self) -> &CrudService<AddressMapper> {
        &self.crud
    }

    /// Adds an address. A user's first address becomes the default.
    pub async fn create(&self, ctx: &RequestContext, req: CreateAddressRequest) -> AppResult<AddressResponse> {
        if self.users.get_by_id(req.user_id).await?.is_none() {
            return Err(AppError::not_found(format!("User {} not found", req.user_id)));
        }
        let mut address = self.crud.build(ctx, req)?;
        let existing = self.entities_of(address.user_id).await?;
        if existing.is_empty() {
            address.is_default = true;
        }

        let mut changes = ChangeSet::at(ctx.request_time);
        if address.is_default {
            Self::clear_defaults(&mut changes, existing);
        }
        let address = changes.add(address);
        self.crud.repository().save_changes(changes).await?;
        info!(address_id = %address.audit.id, user_id = %address.user_id, is_default = address.is_default, "Address added");
        Ok(self.crud.mapper().to_read(&address))
    }

    /// Applies a partial update.
    pub async fn update(&self, id: Uuid, req: UpdateAddressRequest) -> AppResult<Option<AddressResponse>> {
        self.crud.update(id, req).await
    }

    /// Makes an address the user's default. `None` if it is not theirs.
    pub async fn set_default(&self, user_id: Uuid, address_id: Uuid) -> AppResult<Option<AddressResponse>> {
        let addresses = self.entities_of(user_id).await?;
        let Some(target) = addresses.iter().find(|a| a.audit.id == address_id).cloned() else {
            return Ok(None);
        };
        if target.is_default {
            return Ok(Some(self.crud.mapper().to_read(&target)));
        }

        let mut changes = ChangeSet::new();
        Self::clear_defaults(&mut changes, addresses);
        let target = changes.update(Address {
            is_default: true,
            ..target
        });
        self.crud.repository().save_changes(changes).await?;
        info!(address_id = %address_id, user_id = %user_id, "Default address changed");
        Ok(Some(self.crud.mapper().to_read(&target)))
    }

    /// Soft-deletes an address. When it was the default, the most recently
    /// added remaining address takes over.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let Some(address) = self.crud.repository().get_by_id(id).await? else {
            return Ok(false);
        };
        let mut changes = ChangeSet::new();
        changes.soft_delete(id);
        if address.is_default {
            let successor = self
                .entities_of(address.user_id)
                .await?
                .into_iter()
                .filter(|a| a.audit.id != id)
                .max_by_key(|a| a.audit.created_at);
            if let Some(successor) = successor {
                info!(address_id = %successor.audit.id, user_id = %address.user_id, "Default address promoted");
                changes.update(Address {
                    is_default: true,
                    ..successor
                });
            }
        }
        let affected = self.crud.repository().save_changes(changes).await?;
        info!(address_id = %id, user_id = %address.user_id, "Address deleted");
        Ok(affected > 0)
    }

    /// A user's addresses, default first.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<AddressResponse>> {
        self.crud
            .get_all(
                &QuerySpec::new()
                    .filter(FilterField::eq("user_id", user_id))
                    .sort(SortField::desc("is_default"))
                    .sort(SortField::asc("created_at")),
            )
            .await
    }

    /// The user's default address.
    pub async fn default_for(&self, user_id: Uuid) -> AppResult<Option<Address>> {
        self.crud
            .repository()
            .find(
                &QuerySpec::new()
                    .filter(FilterField::eq("user_id", user_id))
                    .filter(FilterField::eq("is_default", true)),
            )
            .await
    }

    async fn entities_of(&self, user_id: Uuid) -> AppResult<Vec<Address>> {
        self.crud
            .repository()
            .get_all(&QuerySpec::new().filter(FilterField::eq("user_id", user_id)))
            .await
    }

    fn clear_defaults(changes: &mut ChangeSet<Address>, addresses: Vec<Address>) {
        for address in addresses.into_iter().filter(|a| a.is_default) {
            changes.update(Address {
                is_default: false,
                ..address
            });
        }
    }
}

impl Service for AddressService {}
