//! PostgreSQL connection management for the inventory service.
//!
//! - [`postgres::PostgresConfig`]: pool settings, loadable through `core_config::FromEnv`
//! - [`postgres::connect_from_config_with_retry`]: startup connection with exponential backoff
//! - [`postgres::run_migrations`]: applies any `MigratorTrait` implementation
//! - [`postgres::check_health`]: `SELECT 1` probe for readiness endpoints
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "inventory_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
