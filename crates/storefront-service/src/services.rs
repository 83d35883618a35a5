//! The assembled service layer.

use std::sync::Arc;

use storefront_core::config::StoreConfig;
use storefront_core::traits::EmailSender;
use storefront_database::Repositories;

use crate::address::AddressService;
use crate::brand::BrandService;
use crate::cart::CartService;
use crate::category::CategoryService;
use crate::coupon::CouponService;
use crate::order::OrderService;
use crate::payment::PaymentService;
use crate::product::ProductService;
use crate::review::ReviewService;
use crate::user::UserService;
use crate::variant::VariantService;
use crate::wishlist::WishlistService;

/// Every business service, sharing one set of repositories.
#[derive(Clone)]
pub struct Services {
    /// Customer accounts.
    pub users: UserService,
    /// Brands.
    pub brands: BrandService,
    /// Category tree.
    pub categories: CategoryService,
    /// Catalog products.
    pub products: ProductService,
    /// Variants and stock.
    pub variants: VariantService,
    /// Carts.
    pub cart: CartService,
    /// Wishlists.
    pub wishlist: WishlistService,
    /// Coupons.
    pub coupons: CouponService,
    /// Checkout and orders.
    pub orders: OrderService,
    /// Payments.
    pub payments: PaymentService,
    /// Reviews.
    pub reviews: ReviewService,
    /// Address books.
    pub addresses: AddressService,
}

impl Services {
    /// Builds every service over `repos`.
    pub fn new(repos: &Repositories, store: StoreConfig, email: Arc<dyn EmailSender>) -> Self {
        let variants = VariantService::new(Arc::clone(&repos.variants), Arc::clone(&repos.products));
        let coupons = CouponService::new(Arc::clone(&repos.coupons));
        let cart = CartService::new(
            Arc::clone(&repos.cart_items),
            Arc::clone(&repos.variants),
            Arc::clone(&repos.products),
            store.clone(),
        );
        let wishlist = WishlistService::new(
            Arc::clone(&repos.wishlist_items),
            Arc::clone(&repos.products),
            Arc::clone(&repos.variants),
            cart.clone(),
        );
        let orders = OrderService::new(repos, cart.clone(), variants.clone(), coupons.clone(), email, store);

        Self {
            users: UserService::new(Arc::clone(&repos.users)),
            brands: BrandService::new(Arc::clone(&repos.brands), Arc::clone(&repos.products)),
            categories: CategoryService::new(Arc::clone(&repos.categories)),
            products: ProductService::new(
                Arc::clone(&repos.products),
                Arc::clone(&repos.variants),
                Arc::clone(&repos.brands),
                Arc::clone(&repos.categories),
                Arc::clone(&repos.reviews),
            ),
            variants,
            cart,
            wishlist,
            coupons,
            orders,
            payments: PaymentService::new(Arc::clone(&repos.payments), Arc::clone(&repos.orders)),
            reviews: ReviewService::new(
                Arc::clone(&repos.reviews),
                Arc::clone(&repos.products),
                Arc::clone(&repos.users),
            ),
            addresses: AddressService::new(Arc::clone(&repos.addresses), Arc::clone(&repos.users)),
        }
    }
}
