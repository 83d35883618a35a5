//! Shared test helpers for integration tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_core::config::StoreConfig;
use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;
use storefront_core::traits::{EmailSender, Entity, Repository};
use storefront_core::types::{ChangeSet, PageRequest, PageResponse, QuerySpec};
use storefront_database::{MemoryRepository, Repositories};
use storefront_entity::coupon::DiscountType;
use storefront_service::address::{AddressResponse, CreateAddressRequest};
use storefront_service::coupon::{CouponResponse, CreateCouponRequest};
use storefront_service::product::{CreateProductRequest, ProductResponse};
use storefront_service::user::{CreateUserRequest, UserResponse};
use storefront_service::variant::{CreateVariantRequest, VariantResponse};
use storefront_service::{RequestContext, Services};

/// A message captured by [`RecordingEmailSender`].
#[derive(Debug, Clone)]
pub struct SentEmail {
    /// Recipient address
    pub recipient: String,
    /// Subject line
    pub subject: String,
    /// Body text
    pub body: String,
}

/// Email sender that keeps every message in memory.
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingEmailSender {
    /// Messages sent so far
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().expect("email lock").clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> AppResult<()> {
        self.sent.lock().expect("email lock").push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// In-memory repository whose writes can be switched to fail.
pub struct SwitchableRepository<E> {
    inner: MemoryRepository<E>,
    reject_writes: AtomicBool,
}

impl<E: Entity> SwitchableRepository<E> {
    /// A writable, empty table
    pub fn new() -> Self {
        Self {
            inner: MemoryRepository::new(),
            reject_writes: AtomicBool::new(false),
        }
    }

    /// A table that fails every write from the start
    pub fn rejecting() -> Self {
        let repo = Self::new();
        repo.set_reject_writes(true);
        repo
    }

    /// Make subsequent writes fail with a database error, or succeed again
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for SwitchableRepository<E> {
    async fn get_all(&self, spec: &QuerySpec) -> AppResult<Vec<E>> {
        self.inner.get_all(spec).await
    }

    async fn find(&self, spec: &QuerySpec) -> AppResult<Option<E>> {
        self.inner.find(spec).await
    }

    async fn get_paged(&self, page: &PageRequest, spec: &QuerySpec) -> AppResult<PageResponse<E>> {
        self.inner.get_paged(page, spec).await
    }

    async fn count(&self, spec: &QuerySpec) -> AppResult<u64> {
        self.inner.count(spec).await
    }

    async fn save_changes(&self, changes: ChangeSet<E>) -> AppResult<u64> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(AppError::new(ErrorKind::Database, format!("Writes to {} are failing", E::NAME)));
        }
        self.inner.save_changes(changes).await
    }
}

/// Test application context
pub struct TestApp {
    /// Raw repositories for direct inspection
    pub repos: Repositories,
    /// The service layer under test
    pub services: Services,
    /// Captured outgoing email
    pub email: Arc<RecordingEmailSender>,
    /// Store settings the services were built with
    pub store: StoreConfig,
}

impl TestApp {
    /// Create a new test application over empty in-memory tables
    pub fn new() -> Self {
        Self::with_repos(Repositories::memory())
    }

    /// Create a test application over the given repositories
    pub fn with_repos(repos: Repositories) -> Self {
        let email = Arc::new(RecordingEmailSender::default());
        let store = StoreConfig::default();
        let services = Services::new(&repos, store.clone(), email.clone());
        Self {
            repos,
            services,
            email,
            store,
        }
    }

    /// Context with no acting user
    pub fn ctx(&self) -> RequestContext {
        RequestContext::system()
    }

    /// Register a customer
    pub async fn create_user(&self, email: &str) -> UserResponse {
        self.services
            .users
            .create(
                &self.ctx(),
                CreateUserRequest {
                    email: email.to_string(),
                    first_name: "Test".to_string(),
                    last_name: "Runner".to_string(),
                    phone: None,
                },
            )
            .await
            .expect("Failed to create user")
    }

    /// Create a product without brand or category
    pub async fn create_product(&self, name: &str, price: Decimal) -> ProductResponse {
        self.services
            .products
            .create(
                &self.ctx(),
                CreateProductRequest {
                    name: name.to_string(),
                    slug: None,
                    description: None,
                    brand_id: None,
                    category_id: None,
                    base_price: price,
                },
            )
            .await
            .expect("Failed to create product")
    }

    /// Create a variant priced like its product
    pub async fn create_variant(&self, product_id: Uuid, sku: &str, stock: i32) -> VariantResponse {
        self.services
            .variants
            .create(
                &self.ctx(),
                CreateVariantRequest {
                    product_id,
                    sku: sku.to_string(),
                    size: Some("42".to_string()),
                    color: Some("Core Black".to_string()),
                    price: None,
                    stock_quantity: stock,
                },
            )
            .await
            .expect("Failed to create variant")
    }

    /// A product with one variant in stock
    pub async fn create_stocked_variant(&self, name: &str, sku: &str, price: Decimal, stock: i32) -> VariantResponse {
        let product = self.create_product(name, price).await;
        self.create_variant(product.id, sku, stock).await
    }

    /// Add a shipping address
    pub async fn create_address(&self, user_id: Uuid, city: &str) -> AddressResponse {
        self.services
            .addresses
            .create(
                &self.ctx(),
                CreateAddressRequest {
                    user_id,
                    full_name: "Test Runner".to_string(),
                    phone: None,
                    line1: "1 Stripe Street".to_string(),
                    line2: None,
                    city: city.to_string(),
                    state: None,
                    postal_code: "91074".to_string(),
                    country: "de".to_string(),
                    is_default: false,
                },
            )
            .await
            .expect("Failed to create address")
    }

    /// Create a coupon valid throughout 2024
    pub async fn create_coupon(&self, code: &str, discount_type: DiscountType, value: Decimal) -> CouponResponse {
        self.services
            .coupons
            .create(&self.ctx(), coupon_request(code, discount_type, value))
            .await
            .expect("Failed to create coupon")
    }
}

/// A coupon request valid throughout 2024
pub fn coupon_request(code: &str, discount_type: DiscountType, value: Decimal) -> CreateCouponRequest {
    CreateCouponRequest {
        code: code.to_string(),
        description: None,
        discount_type,
        discount_value: value,
        minimum_order_amount: None,
        maximum_discount_amount: None,
        valid_from: utc(2024, 1, 1),
        valid_to: Utc
            .with_ymd_and_hms(2024, 12, 31, 23, 59, 59)
            .single()
            .expect("valid date"),
        usage_limit: None,
    }
}

/// Midnight UTC on the given day
pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

/// Money literal in cents
pub fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
