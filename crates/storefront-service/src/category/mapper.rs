//! Category entity/DTO mapping and relation loading.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Mapper, Repository};
use storefront_core::types::{Audit, FilterField, QuerySpec, SortField};
use storefront_entity::category::Category;
use storefront_entity::slug::slug_for;

use super::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::crud::Expand;

/// Maps [`Category`] to and from its DTOs.
#[derive(Debug, Clone, Default)]
pub struct CategoryMapper;

impl Mapper for CategoryMapper {
    type Entity = Category;
    type Read = CategoryResponse;
    type Create = CreateCategoryRequest;
    type Update = UpdateCategoryRequest;

    fn to_read(&self, category: &Category) -> CategoryResponse {
        CategoryResponse {
            id: category.audit.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            parent_id: category.parent_id,
            is_active: category.audit.is_active,
            created_at: category.audit.created_at,
            subcategories: None,
        }
    }

    fn from_create(&self, dto: CreateCategoryRequest, created_by: Option<Uuid>) -> AppResult<Category> {
        let slug = slug_for(dto.slug.as_deref().unwrap_or(&dto.name))?;
        Ok(Category {
            audit: Audit::created_by(created_by),
            name: dto.name,
            slug,
            description: dto.description,
            parent_id: dto.parent_id,
        })
    }

    fn apply_update(&self, category: &mut Category, dto: UpdateCategoryRequest) -> AppResult<()> {
        if dto.clear_parent && dto.parent_id.is_some() {
            return Err(AppError::validation(
                "A category update cannot both set and clear the parent",
            ));
        }
        if let Some(name) = dto.name {
            category.name = name;
        }
        if let Some(slug) = dto.slug {
            category.slug = slug_for(&slug)?;
        }
        if let Some(description) = dto.description {
            category.description = Some(description);
        }
        if let Some(parent_id) = dto.parent_id {
            category.parent_id = Some(parent_id);
        } else if dto.clear_parent {
            category.parent_id = None;
        }
        Ok(())
    }
}

/// Loads the `subcategories` relation (direct children only).
pub struct CategoryExpander {
    categories: Arc<dyn Repository<Category>>,
}

impl CategoryExpander {
    /// Creates an expander reading from `categories`.
    pub fn new(categories: Arc<dyn Repository<Category>>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl Expand<CategoryMapper> for CategoryExpander {
    async fn expand(
        &self,
        read: &mut CategoryResponse,
        category: &Category,
        includes: &[String],
    ) -> AppResult<()> {
        if includes.iter().any(|i| i == "subcategories") {
            let children = self
                .categories
                .get_all(
                    &QuerySpec::new()
                        .filter(FilterField::eq("parent_id", category.audit.id))
                        .sort(SortField::asc("name")),
                )
                .await?;
            read.subcategories = Some(children.iter().map(|c| CategoryMapper.to_read(c)).collect());
        }
        Ok(())
    }
}
