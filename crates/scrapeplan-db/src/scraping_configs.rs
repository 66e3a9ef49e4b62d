//! Database operations for `scraping_configs`.

use chrono::{DateTime, Utc};
use scrapeplan_core::{ConfigPersister, ScrapingConfig, StoredConfig};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

const SELECT_COLUMNS: &str = "id, public_id, project_id, status, keyword_source, \
                              keyword_confidence, config, generated_at, created_at";

/// A row from the `scraping_configs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScrapingConfigRow {
    pub id: i64,
    pub public_id: Uuid,
    pub project_id: String,
    pub status: String,
    pub keyword_source: String,
    pub keyword_confidence: f32,
    /// Full serialized [`ScrapingConfig`].
    pub config: serde_json::Value,
    pub generated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ScrapingConfigRow {
    /// Decodes the JSONB payload back into a [`ScrapingConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Json`] if the stored document no longer matches the
    /// current schema.
    pub fn decode(&self) -> Result<ScrapingConfig, DbError> {
        Ok(serde_json::from_value(self.config.clone())?)
    }
}

impl From<ScrapingConfigRow> for StoredConfig {
    fn from(row: ScrapingConfigRow) -> Self {
        StoredConfig {
            id: row.id,
            public_id: row.public_id,
            project_id: row.project_id,
            status: row.status,
            config: row.config,
            generated_at: row.generated_at,
            created_at: row.created_at,
        }
    }
}

/// Inserts a generated configuration for `project_id`.
///
/// Generates a UUID in Rust and binds it to `public_id`. Returns the full
/// newly-created row.
///
/// # Errors
///
/// Returns [`DbError::Json`] if the config cannot be serialized, or
/// [`DbError::Sqlx`] if the insert fails.
pub async fn insert_scraping_config(
    pool: &PgPool,
    config: &ScrapingConfig,
    project_id: &str,
) -> Result<ScrapingConfigRow, DbError> {
    let public_id = Uuid::new_v4();
    let document = serde_json::to_value(config)?;

    let row = sqlx::query_as::<_, ScrapingConfigRow>(&format!(
        "INSERT INTO scraping_configs \
             (public_id, project_id, status, keyword_source, keyword_confidence, config, generated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {SELECT_COLUMNS}"
    ))
    .bind(public_id)
    .bind(project_id)
    .bind(config.status.as_str())
    .bind(config.keyword_source.as_str())
    .bind(config.keyword_confidence)
    .bind(document)
    .bind(config.generated_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Fetches a stored configuration by its public UUID.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has that id, or [`DbError::Sqlx`]
/// if the query fails.
pub async fn get_scraping_config(
    pool: &PgPool,
    public_id: Uuid,
) -> Result<ScrapingConfigRow, DbError> {
    sqlx::query_as::<_, ScrapingConfigRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM scraping_configs WHERE public_id = $1"
    ))
    .bind(public_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Lists a project's stored configurations, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_scraping_configs_for_project(
    pool: &PgPool,
    project_id: &str,
    limit: i64,
) -> Result<Vec<ScrapingConfigRow>, DbError> {
    let rows = sqlx::query_as::<_, ScrapingConfigRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM scraping_configs \
         WHERE project_id = $1 \
         ORDER BY created_at DESC, id DESC \
         LIMIT $2"
    ))
    .bind(project_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// [`ConfigPersister`] backed by Postgres.
#[derive(Debug, Clone)]
pub struct PgConfigPersister {
    pool: PgPool,
}

impl PgConfigPersister {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ConfigPersister for PgConfigPersister {
    type Error = DbError;

    async fn persist(
        &self,
        config: &ScrapingConfig,
        project_id: &str,
    ) -> Result<StoredConfig, DbError> {
        let row = insert_scraping_config(&self.pool, config, project_id).await?;
        tracing::info!(
            id = row.id,
            public_id = %row.public_id,
            project_id,
            "scraping config stored"
        );
        Ok(row.into())
    }
}
