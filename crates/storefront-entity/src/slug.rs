//! URL slug generation.

use storefront_core::error::AppError;
use storefront_core::result::AppResult;

/// Lower-case ASCII alphanumerics separated by single hyphens.
///
/// `"Ultraboost 22 (Men's)"` becomes `"ultraboost-22-men-s"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// [`slugify`], rejecting text that leaves nothing to put in a URL.
pub fn slug_for(text: &str) -> AppResult<String> {
    let slug = slugify(text);
    if slug.is_empty() {
        return Err(AppError::validation(format!(
            "'{text}' must contain at least one ASCII letter or digit to form a slug"
        )));
    }
    Ok(slug)
}
