//! # Axum Helpers
//!
//! Shared HTTP plumbing for the inventory services.
//!
//! ## Modules
//!
//! - **[`errors`]**: `AppError` and the `{"message": [...]}` error body
//! - **[`extractors`]**: JSON, validated JSON, numeric id path, repeatable query
//! - **[`pagination`]**: page/size/sort parsing and the `Page` envelope
//! - **[`server`]**: router setup with API docs, health checks, graceful shutdown
//! - **[`validation`]**: custom validator functions

pub mod errors;
pub mod extractors;
pub mod pagination;
pub mod server;
pub mod validation;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use errors::{AppError, ErrorResponse, classify};

pub use extractors::{IdPath, JsonBody, QueryParams, ValidatedJson};

pub use pagination::{Page, PageRequest, Pageable, SortDirection, SortOrder};
