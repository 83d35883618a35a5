//! Reference data inserted by `storefront seed`.

use tracing::info;

use storefront_core::result::AppResult;
use storefront_core::traits::Repository;
use storefront_core::types::{Audit, FilterField, QuerySpec};
use storefront_entity::brand::Brand;

/// `(name, slug, description)` of every seeded brand.
pub const SEED_BRANDS: &[(&str, &str, &str)] = &[
    ("adidas", "adidas", "Performance footwear, apparel and accessories"),
    ("adidas Originals", "adidas-originals", "Heritage sneakers and streetwear"),
    ("adidas Sportswear", "adidas-sportswear", "Everyday athleisure"),
    ("adidas TERREX", "adidas-terrex", "Outdoor and trail gear"),
    ("Y-3", "y-3", "Designer collaboration line"),
];

/// Insert every seed brand whose slug is not already present.
///
/// Returns the number of rows inserted; running it twice inserts nothing.
pub async fn seed_brands(brands: &dyn Repository<Brand>) -> AppResult<u64> {
    let mut missing = Vec::new();
    for (name, slug, description) in SEED_BRANDS {
        let spec = QuerySpec::new().filter(FilterField::eq("slug", *slug));
        if brands.exists(&spec).await? {
            continue;
        }
        missing.push(Brand {
            audit: Audit::default(),
            name: (*name).to_string(),
            slug: (*slug).to_string(),
            description: Some((*description).to_string()),
            logo_url: None,
        });
    }

    let inserted = brands.add_range(missing).await?.len() as u64;
    info!(inserted, "Seeded brands");
    Ok(inserted)
}
