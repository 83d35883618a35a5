//! Category hierarchy operations.

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Repository, Service};
use storefront_core::types::{FilterField, QuerySpec, SortField};
use storefront_entity::category::Category;

use super::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use super::mapper::{CategoryExpander, CategoryMapper};
use crate::context::RequestContext;
use crate::crud::CrudService;

/// Manages the category tree.
#[derive(Clone)]
pub struct CategoryService {
    /// Generic CRUD over categories, with `subcategories` expansion.
    crud: CrudService<CategoryMapper>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: Arc<dyn Repository<Category>>) -> Self {
        Self {
            crud: CrudService::new(Arc::clone(&categories), CategoryMapper)
                .with_expander(CategoryExpander::new(categories)),
        }
    }

    /// Generic CRUD operations.
    pub fn crud(&self) -> &CrudService<CategoryMapper> {
        &self.crud
    }

    /// Creates a category under an existing parent (or at the root).
    pub async fn create(&self, ctx: &RequestContext, req: CreateCategoryRequest) -> AppResult<CategoryResponse> {
        if let Some(parent_id) = req.parent_id {
            self.require(parent_id).await?;
        }
        self.crud.create(ctx, req).await
    }

    /// Applies a partial update. Re-parenting may not create a cycle.
    pub async fn update(&self, id: Uuid, req: UpdateCategoryRequest) -> AppResult<Option<CategoryResponse>> {
        if let Some(parent_id) = req.parent_id {
            self.ensure_not_descendant(id, parent_id).await?;
        }
        self.crud.update(id, req).await
    }

    /// Direct children of `parent_id`, or the roots when `None`.
    pub async fn tree(&self, parent_id: Option<Uuid>) -> AppResult<Vec<CategoryResponse>> {
        let filter = match parent_id {
            Some(parent_id) => FilterField::eq("parent_id", parent_id),
            None => FilterField::is_null("parent_id"),
        };
        self.crud
            .get_all(
                &QuerySpec::new()
                    .filter(filter)
                    .sort(SortField::asc("name"))
                    .include("subcategories"),
            )
            .await
    }

    async fn require(&self, id: Uuid) -> AppResult<Category> {
        self.crud
            .repository()
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }

    /// Walk up from `new_parent`; meeting `id` on the way means a cycle.
    async fn ensure_not_descendant(&self, id: Uuid, new_parent: Uuid) -> AppResult<()> {
        let mut seen = HashSet::new();
        let mut current = Some(new_parent);
        while let Some(ancestor) = current {
            if ancestor == id {
                return Err(AppError::business_rule(
                    "A category cannot be moved under itself or one of its descendants",
                ));
            }
            if !seen.insert(ancestor) {
                break;
            }
            current = self.require(ancestor).await?.parent_id;
        }
        Ok(())
    }
}

impl Service for CategoryService {}
