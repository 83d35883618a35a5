//! Review request and response DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create review request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    /// Author.
    pub user_id: Uuid,
    /// Reviewed product.
    pub product_id: Uuid,
    /// Stars.
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
    /// Headline.
    #[validate(length(max = 200))]
    pub title: Option<String>,
    /// Body.
    #[validate(length(max = 5000))]
    pub comment: Option<String>,
}

/// Partial review update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    /// New rating.
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i16>,
    /// New headline.
    #[validate(length(max = 200))]
    pub title: Option<String>,
    /// New body.
    #[validate(length(max = 5000))]
    pub comment: Option<String>,
}

/// Review as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// Review ID.
    pub id: Uuid,
    /// Author.
    pub user_id: Uuid,
    /// Reviewed product.
    pub product_id: Uuid,
    /// Stars.
    pub rating: i16,
    /// Headline.
    pub title: Option<String>,
    /// Body.
    pub comment: Option<String>,
    /// Whether moderation approved it.
    pub is_approved: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Aggregate rating of a product over approved reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRating {
    /// Product.
    pub product_id: Uuid,
    /// Mean rating rounded to two places, zero without reviews.
    pub average: Decimal,
    /// Number of approved reviews.
    pub count: u64,
}
