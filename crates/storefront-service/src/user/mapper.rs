//! User entity/DTO mapping.

use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_core::traits::Mapper;
use storefront_core::types::Audit;
use storefront_entity::user::User;

use super::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};

/// Maps [`User`] to and from its DTOs. Emails are stored lower-case.
#[derive(Debug, Clone, Default)]
pub struct UserMapper;

impl Mapper for UserMapper {
    type Entity = User;
    type Read = UserResponse;
    type Create = CreateUserRequest;
    type Update = UpdateUserRequest;

    fn to_read(&self, user: &User) -> UserResponse {
        UserResponse {
            id: user.audit.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
            phone: user.phone.clone(),
            is_active: user.audit.is_active,
            created_at: user.audit.created_at,
            updated_at: user.audit.updated_at,
        }
    }

    fn from_create(&self, dto: CreateUserRequest, created_by: Option<Uuid>) -> AppResult<User> {
        Ok(User {
            audit: Audit::created_by(created_by),
            email: User::normalize_email(&dto.email),
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            phone: dto.phone,
        })
    }

    fn apply_update(&self, user: &mut User, dto: UpdateUserRequest) -> AppResult<()> {
        if let Some(email) = dto.email {
            user.email = User::normalize_email(&email);
        }
        if let Some(first_name) = dto.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = dto.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(phone) = dto.phone {
            user.phone = Some(phone);
        }
        Ok(())
    }
}
