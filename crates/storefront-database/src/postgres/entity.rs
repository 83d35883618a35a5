//! Row binding for every persisted entity.

use sqlx::postgres::{PgRow, Postgres};
use sqlx::query_builder::Separated;
use sqlx::FromRow;

use storefront_core::traits::Entity;
use storefront_core::types::Audit;
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

/// An entity the PostgreSQL adapter can read and write.
pub trait PgEntity: Entity + for<'r> FromRow<'r, PgRow> {
    /// Bind every column value, in [`Entity::COLUMNS`] order.
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>);
}

fn push_audit<'args>(audit: &Audit, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
    row.push_bind(audit.id)
        .push_bind(audit.created_at)
        .push_bind(audit.updated_at)
        .push_bind(audit.created_by)
        .push_bind(audit.is_deleted)
        .push_bind(audit.is_active);
}

impl PgEntity for User {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.email.clone())
            .push_bind(self.first_name.clone())
            .push_bind(self.last_name.clone())
            .push_bind(self.phone.clone());
    }
}

impl PgEntity for Brand {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.name.clone())
            .push_bind(self.slug.clone())
            .push_bind(self.description.clone())
            .push_bind(self.logo_url.clone());
    }
}

impl PgEntity for Category {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.name.clone())
            .push_bind(self.slug.clone())
            .push_bind(self.description.clone())
            .push_bind(self.parent_id);
    }
}

impl PgEntity for Product {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.name.clone())
            .push_bind(self.slug.clone())
            .push_bind(self.description.clone())
            .push_bind(self.brand_id)
            .push_bind(self.category_id)
            .push_bind(self.base_price);
    }
}

impl PgEntity for ProductVariant {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.product_id)
            .push_bind(self.sku.clone())
            .push_bind(self.size.clone())
            .push_bind(self.color.clone())
            .push_bind(self.price)
            .push_bind(self.stock_quantity);
    }
}

impl PgEntity for CartItem {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.user_id)
            .push_bind(self.variant_id)
            .push_bind(self.quantity);
    }
}

impl PgEntity for WishlistItem {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.user_id).push_bind(self.product_id);
    }
}

impl PgEntity for Coupon {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.code.clone())
            .push_bind(self.description.clone())
            .push_bind(self.discount_type)
            .push_bind(self.discount_value)
            .push_bind(self.minimum_order_amount)
            .push_bind(self.maximum_discount_amount)
            .push_bind(self.valid_from)
            .push_bind(self.valid_to)
            .push_bind(self.usage_limit)
            .push_bind(self.used_count);
    }
}

impl PgEntity for Order {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.order_number.clone())
            .push_bind(self.user_id)
            .push_bind(self.status)
            .push_bind(self.shipping_address_id)
            .push_bind(self.coupon_id)
            .push_bind(self.subtotal)
            .push_bind(self.discount_amount)
            .push_bind(self.shipping_fee)
            .push_bind(self.total_amount)
            .push_bind(self.notes.clone());
    }
}

impl PgEntity for OrderItem {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.order_id)
            .push_bind(self.variant_id)
            .push_bind(self.product_name.clone())
            .push_bind(self.sku.clone())
            .push_bind(self.quantity)
            .push_bind(self.unit_price)
            .push_bind(self.line_total);
    }
}

impl PgEntity for Payment {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.order_id)
            .push_bind(self.amount)
            .push_bind(self.method)
            .push_bind(self.status)
            .push_bind(self.transaction_reference.clone())
            .push_bind(self.paid_at);
    }
}

impl PgEntity for Review {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.user_id)
            .push_bind(self.product_id)
            .push_bind(self.rating)
            .push_bind(self.title.clone())
            .push_bind(self.comment.clone())
            .push_bind(self.is_approved);
    }
}

impl PgEntity for Address {
    fn push_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        push_audit(&self.audit, row);
        row.push_bind(self.user_id)
            .push_bind(self.full_name.clone())
            .push_bind(self.phone.clone())
            .push_bind(self.line1.clone())
            .push_bind(self.line2.clone())
            .push_bind(self.city.clone())
            .push_bind(self.state.clone())
            .push_bind(self.postal_code.clone())
            .push_bind(self.country.clone())
            .push_bind(self.is_default);
    }
}
