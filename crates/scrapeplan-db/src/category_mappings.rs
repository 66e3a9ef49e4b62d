//! Database operations for `category_mappings`, the curated lookup store.

use chrono::{DateTime, Utc};
use scrapeplan_core::{CategoryMapping, CategoryMappingStore, TargetKind};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `category_mappings` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryMappingRow {
    pub id: i64,
    pub kind: String,
    /// Empty string when the row is keyed by subcategory only.
    pub category: String,
    pub subcategory: String,
    pub value: String,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// [`CategoryMappingStore`] backed by Postgres.
#[derive(Debug, Clone)]
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CategoryMappingStore for PgCategoryStore {
    type Error = DbError;

    async fn lookup(
        &self,
        kind: TargetKind,
        category: &str,
        subcategory: &str,
    ) -> Result<Vec<String>, DbError> {
        let values = sqlx::query_scalar::<_, String>(
            "SELECT value FROM category_mappings \
             WHERE kind = $1 \
               AND ((category <> '' AND category = $2) \
                 OR (subcategory <> '' AND subcategory = $3)) \
             ORDER BY (category <> '' AND category = $2) DESC, \
                      category COLLATE \"C\", subcategory COLLATE \"C\", \
                      priority, value COLLATE \"C\"",
        )
        .bind(kind.as_str())
        .bind(category)
        .bind(subcategory)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            kind = %kind,
            category,
            subcategory,
            found = values.len(),
            "category mapping lookup"
        );
        Ok(values)
    }
}

/// Upsert curated mappings. Each value's priority is its position in its group.
///
/// Returns the number of rows written. All upserts run inside a single
/// transaction; if any operation fails the entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_category_mappings(
    pool: &PgPool,
    mappings: &[CategoryMapping],
) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;

    for mapping in mappings {
        let (category, subcategory) = mapping.keys();
        for (position, value) in mapping.values.iter().enumerate() {
            let priority = i32::try_from(position).unwrap_or(i32::MAX);
            sqlx::query(
                "INSERT INTO category_mappings (kind, category, subcategory, value, priority) \
                 VALUES ($1, $2, $3, $4, $5) \
                 ON CONFLICT (kind, category, subcategory, value) DO UPDATE SET \
                     priority = EXCLUDED.priority, \
                     updated_at = NOW()",
            )
            .bind(mapping.kind.as_str())
            .bind(&category)
            .bind(&subcategory)
            .bind(value.trim())
            .bind(priority)
            .execute(&mut *tx)
            .await?;

            count += 1;
        }
    }

    tx.commit().await?;
    Ok(count)
}

/// Lists every mapping row of `kind`, for inspection.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_category_mappings(
    pool: &PgPool,
    kind: TargetKind,
) -> Result<Vec<CategoryMappingRow>, DbError> {
    let rows = sqlx::query_as::<_, CategoryMappingRow>(
        "SELECT id, kind, category, subcategory, value, priority, created_at, updated_at \
         FROM category_mappings \
         WHERE kind = $1 \
         ORDER BY category, subcategory, priority, id",
    )
    .bind(kind.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
