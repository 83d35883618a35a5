//! SQL generation for [`QuerySpec`] evaluation and change-set writes.
//!
//! Column names are only ever taken from [`Entity::COLUMNS`]; caller-supplied
//! field names are looked up there first, and every value is a bind
//! parameter.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::Entity;
use storefront_core::types::{FilterField, FilterOp, FilterValue, PageRequest, QuerySpec};

use super::entity::PgEntity;

/// Resolve a caller-supplied field name to the entity's static column name.
fn column<E: Entity>(field: &str) -> AppResult<&'static str> {
    E::COLUMNS
        .iter()
        .copied()
        .find(|c| *c == field)
        .ok_or_else(|| AppError::validation(format!("Unknown field '{field}' for {}", E::NAME)))
}

fn push_value<'args>(qb: &mut QueryBuilder<'args, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::Boolean(b) => qb.push_bind(*b),
        FilterValue::Integer(i) => qb.push_bind(*i),
        FilterValue::Float(f) => qb.push_bind(*f),
        FilterValue::Uuid(u) => qb.push_bind(*u),
        FilterValue::Timestamp(t) => qb.push_bind(*t),
        FilterValue::String(s) => qb.push_bind(s.clone()),
        FilterValue::Decimal(d) => qb.push_bind(*d),
        FilterValue::StringList(list) => qb.push_bind(list.clone()),
        FilterValue::Null => qb.push("NULL"),
    };
}

/// Primary, audit and foreign key columns are all `UUID`.
fn is_uuid_column(col: &str) -> bool {
    col == "id" || col == "created_by" || col.ends_with("_id")
}

/// Rewrite UUID-shaped strings in the lower-case hyphenated form that
/// `uuid::text` produces.
fn canonical_uuid_text(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.parse::<Uuid>().map_or_else(|_| v.clone(), |u| u.to_string()))
        .collect()
}

fn push_filter<'args>(qb: &mut QueryBuilder<'args, Postgres>, col: &'static str, filter: &FilterField) {
    match (filter.op, &filter.value) {
        (FilterOp::IsNull, _) => {
            qb.push(col).push(" IS NULL");
        }
        (FilterOp::IsNotNull, _) => {
            qb.push(col).push(" IS NOT NULL");
        }
        // Comparisons against NULL are never true.
        (_, FilterValue::Null) => {
            qb.push("FALSE");
        }
        (FilterOp::In, FilterValue::StringList(values)) if values.is_empty() => {
            qb.push("FALSE");
        }
        (FilterOp::In, FilterValue::StringList(values)) => {
            let values = if is_uuid_column(col) {
                canonical_uuid_text(values)
            } else {
                values.clone()
            };
            qb.push(col).push("::text = ANY(").push_bind(values).push(")");
        }
        (op @ (FilterOp::Like | FilterOp::ILike), value) => {
            qb.push(col)
                .push("::text ")
                .push(op.as_sql())
                .push(" ")
                .push_bind(value.as_text().unwrap_or_default());
        }
        // A string that is not a UUID never equals, or orders against, one.
        (op, FilterValue::String(s)) if is_uuid_column(col) => match s.parse::<Uuid>() {
            Ok(id) => {
                qb.push(col).push(" ").push(op.as_sql()).push(" ").push_bind(id);
            }
            Err(_) => {
                qb.push("FALSE");
            }
        },
        // Enum columns compare against their text form.
        (op, FilterValue::String(s)) => {
            qb.push(col)
                .push("::text ")
                .push(op.as_sql())
                .push(" ")
                .push_bind(s.clone());
        }
        (op, value) => {
            qb.push(col).push(" ").push(op.as_sql()).push(" ");
            push_value(qb, value);
        }
    }
}

fn push_conditions<'args, E: Entity>(
    qb: &mut QueryBuilder<'args, Postgres>,
    spec: &QuerySpec,
) -> AppResult<()> {
    let mut first = true;
    if !spec.include_deleted {
        qb.push(" WHERE is_deleted = FALSE");
        first = false;
    }
    for filter in &spec.filters {
        let col = column::<E>(&filter.field)?;
        qb.push(if first { " WHERE " } else { " AND " });
        push_filter(qb, col, filter);
        first = false;
    }
    Ok(())
}

fn push_order<'args, E: Entity>(
    qb: &mut QueryBuilder<'args, Postgres>,
    spec: &QuerySpec,
) -> AppResult<()> {
    for (i, sort) in spec.sort.iter().enumerate() {
        let col = column::<E>(&sort.field)?;
        qb.push(if i == 0 { " ORDER BY " } else { ", " })
            .push(col)
            .push(" ")
            .push(sort.direction.as_sql());
    }
    Ok(())
}

/// `SELECT <columns> FROM <table> WHERE ... ORDER BY ...`
pub fn select<'args, E: Entity>(spec: &QuerySpec) -> AppResult<QueryBuilder<'args, Postgres>> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", E::COLUMNS.join(", "), E::TABLE));
    push_conditions::<E>(&mut qb, spec)?;
    push_order::<E>(&mut qb, spec)?;
    Ok(qb)
}

/// [`select`] limited to the first row.
pub fn select_first<'args, E: Entity>(spec: &QuerySpec) -> AppResult<QueryBuilder<'args, Postgres>> {
    let mut qb = select::<E>(spec)?;
    qb.push(" LIMIT 1");
    Ok(qb)
}

/// [`select`] restricted to one page.
pub fn select_page<'args, E: Entity>(
    spec: &QuerySpec,
    page: &PageRequest,
) -> AppResult<QueryBuilder<'args, Postgres>> {
    let mut qb = select::<E>(spec)?;
    qb.push(" LIMIT ")
        .push_bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .push(" OFFSET ")
        .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
    Ok(qb)
}

/// `SELECT COUNT(*) FROM <table> WHERE ...`
pub fn count<'args, E: Entity>(spec: &QuerySpec) -> AppResult<QueryBuilder<'args, Postgres>> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
    push_conditions::<E>(&mut qb, spec)?;
    Ok(qb)
}

/// Insert one row with every column bound.
pub fn insert<'args, E: PgEntity>(entity: &E) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) ",
        E::TABLE,
        E::COLUMNS.join(", ")
    ));
    qb.push_values(std::iter::once(entity), |mut row, e| e.push_values(&mut row));
    qb
}

/// Overwrite every column of a live row.
pub fn update<'args, E: PgEntity>(entity: &E) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "UPDATE {} SET ({}) = ROW(",
        E::TABLE,
        E::COLUMNS.join(", ")
    ));
    {
        let mut row = qb.separated(", ");
        entity.push_values(&mut row);
    }
    qb.push(") WHERE id = ")
        .push_bind(entity.id())
        .push(" AND is_deleted = FALSE");
    qb
}

/// Flag a live row as deleted.
pub fn soft_delete<'args, E: Entity>(id: Uuid, now: DateTime<Utc>) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "UPDATE {} SET is_deleted = TRUE, updated_at = ",
        E::TABLE
    ));
    qb.push_bind(now)
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND is_deleted = FALSE");
    qb
}

/// Remove a row regardless of its deleted flag.
pub fn hard_delete<'args, E: Entity>(id: Uuid) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new(format!("DELETE FROM {} WHERE id = ", E::TABLE));
    qb.push_bind(id);
    qb
}

/// Set the active flag of a live row.
pub fn set_active<'args, E: Entity>(
    id: Uuid,
    is_active: bool,
    now: DateTime<Utc>,
) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET is_active = ", E::TABLE));
    qb.push_bind(is_active)
        .push(", updated_at = ")
        .push_bind(now)
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND is_deleted = FALSE");
    qb
}
