//! The full set of repositories, one per entity type.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use storefront_core::config::{DatabaseBackend, DatabaseConfig};
use storefront_core::result::AppResult;
use storefront_core::traits::{Entity, Repository};
use storefront_entity::address::Address;
use storefront_entity::brand::Brand;
use storefront_entity::cart::CartItem;
use storefront_entity::category::Category;
use storefront_entity::coupon::Coupon;
use storefront_entity::order::{Order, OrderItem};
use storefront_entity::payment::Payment;
use storefront_entity::product::{Product, ProductVariant};
use storefront_entity::review::Review;
use storefront_entity::user::User;
use storefront_entity::wishlist::WishlistItem;

use crate::connection::DatabasePool;
use crate::memory::MemoryRepository;
use crate::postgres::{PgEntity, PgRepository};

/// Shared handles to every entity repository.
#[derive(Clone)]
pub struct Repositories {
    /// Customer accounts.
    pub users: Arc<dyn Repository<User>>,
    /// Brands.
    pub brands: Arc<dyn Repository<Brand>>,
    /// Categories.
    pub categories: Arc<dyn Repository<Category>>,
    /// Products.
    pub products: Arc<dyn Repository<Product>>,
    /// Product variants.
    pub variants: Arc<dyn Repository<ProductVariant>>,
    /// Cart lines.
    pub cart_items: Arc<dyn Repository<CartItem>>,
    /// Wishlist entries.
    pub wishlist_items: Arc<dyn Repository<WishlistItem>>,
    /// Coupons.
    pub coupons: Arc<dyn Repository<Coupon>>,
    /// Orders.
    pub orders: Arc<dyn Repository<Order>>,
    /// Order lines.
    pub order_items: Arc<dyn Repository<OrderItem>>,
    /// Payments.
    pub payments: Arc<dyn Repository<Payment>>,
    /// Reviews.
    pub reviews: Arc<dyn Repository<Review>>,
    /// Addresses.
    pub addresses: Arc<dyn Repository<Address>>,
}

fn memory<E: Entity>() -> Arc<dyn Repository<E>> {
    Arc::new(MemoryRepository::<E>::new())
}

fn postgres<E: PgEntity>(pool: &PgPool) -> Arc<dyn Repository<E>> {
    Arc::new(PgRepository::<E>::new(pool.clone()))
}

impl Repositories {
    /// Empty in-memory tables.
    pub fn memory() -> Self {
        Self {
            users: memory(),
            brands: memory(),
            categories: memory(),
            products: memory(),
            variants: memory(),
            cart_items: memory(),
            wishlist_items: memory(),
            coupons: memory(),
            orders: memory(),
            order_items: memory(),
            payments: memory(),
            reviews: memory(),
            addresses: memory(),
        }
    }

    /// PostgreSQL tables sharing one pool.
    pub fn postgres(pool: &DatabasePool) -> Self {
        let pool = pool.pool();
        Self {
            users: postgres(pool),
            brands: postgres(pool),
            categories: postgres(pool),
            products: postgres(pool),
            variants: postgres(pool),
            cart_items: postgres(pool),
            wishlist_items: postgres(pool),
            coupons: postgres(pool),
            orders: postgres(pool),
            order_items: postgres(pool),
            payments: postgres(pool),
            reviews: postgres(pool),
            addresses: postgres(pool),
        }
    }

    /// Build repositories for the configured backend.
    ///
    /// The pool is returned alongside when the backend is PostgreSQL so the
    /// caller can run migrations and close it on shutdown.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<(Self, Option<DatabasePool>)> {
        match config.backend {
            DatabaseBackend::Memory => {
                info!("Using in-memory storage backend");
                Ok((Self::memory(), None))
            }
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                Ok((Self::postgres(&pool), Some(pool)))
            }
        }
    }
}
