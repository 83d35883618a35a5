//! Review entity/DTO mapping.

use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_core::traits::Mapper;
use storefront_core::types::Audit;
use storefront_entity::review::Review;

use super::dto::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};

/// Maps [`Review`] to and from its DTOs.
#[derive(Debug, Clone, Default)]
pub struct ReviewMapper;

impl Mapper for ReviewMapper {
    type Entity = Review;
    type Read = ReviewResponse;
    type Create = CreateReviewRequest;
    type Update = UpdateReviewRequest;

    fn to_read(&self, review: &Review) -> ReviewResponse {
        ReviewResponse {
            id: review.audit.id,
            user_id: review.user_id,
            product_id: review.product_id,
            rating: review.rating,
            title: review.title.clone(),
            comment: review.comment.clone(),
            is_approved: review.is_approved,
            created_at: review.audit.created_at,
        }
    }

    fn from_create(&self, dto: CreateReviewRequest, created_by: Option<Uuid>) -> AppResult<Review> {
        Ok(Review {
            audit: Audit::created_by(created_by.or(Some(dto.user_id))),
            user_id: dto.user_id,
            product_id: dto.product_id,
            rating: dto.rating,
            title: dto.title,
            comment: dto.comment,
            is_approved: false,
        })
    }

    /// Any edit sends the review back to moderation.
    fn apply_update(&self, review: &mut Review, dto: UpdateReviewRequest) -> AppResult<()> {
        if let Some(rating) = dto.rating {
            review.rating = rating;
        }
        if let Some(title) = dto.title {
            review.title = Some(title);
        }
        if let Some(comment) = dto.comment {
            review.comment = Some(comment);
        }
        review.is_approved = false;
        Ok(())
    }
}
