//! Review submission, moderation and rating aggregation.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Repository, Service};
use storefront_core::types::{FilterField, PageRequest, PageResponse, QuerySpec, SortField};
use storefront_entity::money::round_money;
use storefront_entity::product::Product;
use storefront_entity::review::Review;
use storefront_entity::user::User;

use super::dto::{CreateReviewRequest, ProductRating, ReviewResponse, UpdateReviewRequest};
use super::mapper::ReviewMapper;
use crate::context::RequestContext;
use crate::crud::CrudService;

/// Manages product reviews.
#[derive(Clone)]
pub struct ReviewService {
    /// Generic CRUD over reviews.
    crud: CrudService<ReviewMapper>,
    products: Arc<dyn Repository<Product>>,
    users: Arc<dyn Repository<User>>,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(
        reviews: Arc<dyn Repository<Review>>,
        products: Arc<dyn Repository<Product>>,
        users: Arc<dyn Repository<User>>,
    ) -> Self {
        Self {
            crud: CrudService::new(reviews, ReviewMapper),
            products,
            users,
        }
    }

    /// Generic CRUD operations.
    pub fn crud(&self) -> &CrudService<ReviewMapper> {
        &self.crud
    }

    /// Submits a review. A user reviews a product at most once.
    pub async fn create(&self, ctx: &RequestContext, req: CreateReviewRequest) -> AppResult<ReviewResponse> {
        if self.users.get_by_id(req.user_id).await?.is_none() {
            return Err(AppError::not_found(format!("User {} not found", req.user_id)));
        }
        if self.products.get_by_id(req.product_id).await?.is_none() {
            return Err(AppError::not_found(format!("Product {} not found", req.product_id)));
        }
        let existing = self
            .crud
            .exists(
                &QuerySpec::new()
                    .filter(FilterField::eq("user_id", req.user_id))
                    .filter(FilterField::eq("product_id", req.product_id)),
            )
            .await?;
        if existing {
            return Err(AppError::conflict("This product has already been reviewed by the user"));
        }
        let review = self.crud.create(ctx, req).await?;
        info!(review_id = %review.id, product_id = %review.product_id, rating = review.rating, "Review submitted");
        Ok(review)
    }

    /// Edits a review. The review returns to moderation.
    pub async fn update(&self, id: Uuid, req: UpdateReviewRequest) -> AppResult<Option<ReviewResponse>> {
        self.crud.update(id, req).await
    }

    /// Marks a review as approved. `None` if it does not exist.
    pub async fn approve(&self, id: Uuid) -> AppResult<Option<ReviewResponse>> {
        let Some(mut review) = self.crud.repository().get_by_id(id).await? else {
            return Ok(None);
        };
        review.is_approved = true;
        let approved = self.crud.save(review).await?;
        if approved.is_some() {
            info!(review_id = %id, "Review approved");
        }
        Ok(approved)
    }

    /// Average and count of approved reviews.
    pub async fn product_rating(&self, product_id: Uuid) -> AppResult<ProductRating> {
        let reviews = self
            .crud
            .repository()
            .get_all(&Self::approved_for(product_id))
            .await?;
        let count = reviews.len() as u64;
        let average = if reviews.is_empty() {
            Decimal::ZERO
        } else {
            let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
            round_money(Decimal::from(sum) / Decimal::from(count))
        };
        Ok(ProductRating {
            product_id,
            average,
            count,
        })
    }

    /// Approved reviews of a product, newest first.
    pub async fn list_for_product(&self, product_id: Uuid, page: &PageRequest) -> AppResult<PageResponse<ReviewResponse>> {
        self.crud
            .get_paged(page, &Self::approved_for(product_id).sort(SortField::desc("created_at")))
            .await
    }

    fn approved_for(product_id: Uuid) -> QuerySpec {
        QuerySpec::new()
            .filter(FilterField::eq("product_id", product_id))
            .filter(FilterField::eq("is_approved", true))
    }
}

impl Service for ReviewService {}
