//! Translation of sqlx errors into [`AppError`].

use storefront_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning unique violations into conflicts.
pub fn map_sqlx_error(context: &str, e: sqlx::Error) -> AppError {
    let constraint = match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Some(db.constraint().unwrap_or("unique constraint").to_string())
        }
        _ => None,
    };

    match constraint {
        Some(constraint) => AppError::with_source(
            ErrorKind::Conflict,
            format!("{context}: duplicate value violates {constraint}"),
            e,
        ),
        None => AppError::with_source(ErrorKind::Database, context.to_string(), e),
    }
}
