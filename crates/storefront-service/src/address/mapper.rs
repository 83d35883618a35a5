//! Address entity/DTO mapping.

use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_core::traits::Mapper;
use storefront_core::types::Audit;
use storefront_entity::address::Address;

use super::dto::{AddressResponse, CreateAddressRequest, UpdateAddressRequest};

/// Maps [`Address`] to and from its DTOs.
#[derive(Debug, Clone, Default)]
pub struct AddressMapper;

impl Mapper for AddressMapper {
    type Entity = Address;
    type Read = AddressResponse;
    type Create = CreateAddressRequest;
    type Update = UpdateAddressRequest;

    fn to_read(&self, address: &Address) -> AddressResponse {
        AddressResponse {
            id: address.audit.id,
            user_id: address.user_id,
            full_name: address.full_name.clone(),
            phone: address.phone.clone(),
            line1: address.line1.clone(),
            line2: address.line2.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
            is_default: address.is_default,
            created_at: address.audit.created_at,
        }
    }

    fn from_create(&self, dto: CreateAddressRequest, created_by: Option<Uuid>) -> AppResult<Address> {
        Ok(Address {
            audit: Audit::created_by(created_by),
            user_id: dto.user_id,
            full_name: dto.full_name,
            phone: dto.phone,
            line1: dto.line1,
            line2: dto.line2,
            city: dto.city,
            state: dto.state,
            postal_code: dto.postal_code,
            country: dto.country.to_uppercase(),
            is_default: dto.is_default,
        })
    }

    fn apply_update(&self, address: &mut Address, dto: UpdateAddressRequest) -> AppResult<()> {
        if let Some(full_name) = dto.full_name {
            address.full_name = full_name;
        }
        if let Some(phone) = dto.phone {
            address.phone = Some(phone);
        }
        if let Some(line1) = dto.line1 {
            address.line1 = line1;
        }
        if let Some(line2) = dto.line2 {
            address.line2 = Some(line2);
        }
        if let Some(city) = dto.city {
            address.city = city;
        }
        if let Some(state) = dto.state {
            address.state = Some(state);
        }
        if let Some(postal_code) = dto.postal_code {
            address.postal_code = postal_code;
        }
        if let Some(country) = dto.country {
            address.country = country.to_uppercase();
        }
        Ok(())
    }
}
