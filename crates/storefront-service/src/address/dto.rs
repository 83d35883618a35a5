//! Address request and response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create address request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAddressRequest {
    /// Owner.
    pub user_id: Uuid,
    /// Recipient name.
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
    /// Contact phone.
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    /// Street line.
    #[validate(length(min = 1, max = 300, message = "Address line is required"))]
    pub line1: String,
    /// Additional line.
    #[validate(length(max = 300))]
    pub line2: Option<String>,
    /// City.
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,
    /// State or region.
    #[validate(length(max = 100))]
    pub state: Option<String>,
    /// Postal code.
    #[validate(length(min = 1, max = 20, message = "Postal code is required"))]
    pub postal_code: String,
    /// ISO country code.
    #[validate(length(equal = 2, message = "Country must be a two-letter code"))]
    pub country: String,
    /// Make this the default address.
    #[serde(default)]
    pub is_default: bool,
}

/// Partial address update. Use `set_default` to change the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAddressRequest {
    /// New recipient name.
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    /// New phone.
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    /// New street line.
    #[validate(length(min = 1, max = 300))]
    pub line1: Option<String>,
    /// New additional line.
    #[validate(length(max = 300))]
    pub line2: Option<String>,
    /// New city.
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    /// New state.
    #[validate(length(max = 100))]
    pub state: Option<String>,
    /// New postal code.
    #[validate(length(min = 1, max = 20))]
    pub postal_code: Option<String>,
    /// New country.
    #[validate(length(equal = 2, message = "Country must be a two-letter code"))]
    pub country: Option<String>,
}

/// Address as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResponse {
    /// Address ID.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Recipient name.
    pub full_name: String,
    /// Phone.
    pub phone: Option<String>,
    /// Street line.
    pub line1: String,
    /// Additional line.
    pub line2: Option<String>,
    /// City.
    pub city: String,
    /// State.
    pub state: Option<String>,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
    /// Whether this is the user's default.
    pub is_default: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}
