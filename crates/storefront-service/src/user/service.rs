//! Customer account operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Mapper, Repository, Service};
use storefront_core::types::{FilterField, QuerySpec};
use storefront_entity::user::User;

use super::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use super::mapper::UserMapper;
use crate::context::RequestContext;
use crate::crud::CrudService;

/// Manages customer accounts.
#[derive(Clone)]
pub struct UserService {
    /// Generic CRUD over users.
    crud: CrudService<UserMapper>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn Repository<User>>) -> Self {
        Self {
            crud: CrudService::new(users, UserMapper),
        }
    }

    /// Generic reads, soft delete and activation.
    pub fn crud(&self) -> &CrudService<UserMapper> {
        &self.crud
    }

    /// Registers a user. Emails are unique among live accounts.
    pub async fn create(&self, ctx: &RequestContext, req: CreateUserRequest) -> AppResult<UserResponse> {
        let user = self.crud.build(ctx, req)?;
        if self.find_entity_by_email(&user.email).await?.is_some() {
            return Err(AppError::conflict(format!(
                "A user with email '{}' already exists",
                user.email
            )));
        }
        let created = self.crud.insert(user).await?;
        info!(user_id = %created.id, email = %created.email, "User registered");
        Ok(created)
    }

    /// Applies a partial profile update.
    pub async fn update(&self, id: Uuid, req: UpdateUserRequest) -> AppResult<Option<UserResponse>> {
        if let Some(email) = &req.email {
            let email = User::normalize_email(email);
            if let Some(existing) = self.find_entity_by_email(&email).await? {
                if existing.audit.id != id {
                    return Err(AppError::conflict(format!(
                        "A user with email '{email}' already exists"
                    )));
                }
            }
        }
        self.crud.update(id, req).await
    }

    /// Looks up a live user by email, case-insensitively.
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<UserResponse>> {
        let user = self.find_entity_by_email(&User::normalize_email(email)).await?;
        Ok(user.map(|u| self.crud.mapper().to_read(&u)))
    }

    async fn find_entity_by_email(&self, normalized: &str) -> AppResult<Option<User>> {
        self.crud
            .repository()
            .find(&QuerySpec::new().filter(FilterField::eq("email", normalized)))
            .await
    }
}

impl Service for UserService {}
