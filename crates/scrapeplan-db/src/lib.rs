//! Postgres persistence: curated category mappings and stored scraping configs.

pub mod category_mappings;
pub mod error;
pub mod pool;
pub mod scraping_configs;

pub use category_mappings::{
    list_category_mappings, seed_category_mappings, CategoryMappingRow, PgCategoryStore,
};
pub use error::DbError;
pub use pool::{connect_pool, connect_pool_from_config, health_check, run_migrations, PoolConfig};
pub use scraping_configs::{
    get_scraping_config, insert_scraping_config, list_scraping_configs_for_project,
    PgConfigPersister, ScrapingConfigRow,
};
