//! Products Domain
//!
//! Products with price, stock quantity and an optional category, plus a
//! filtered search over them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints under /api/products
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Category resolution, logging
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (Postgres + in-memory), filter predicates
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, ProductDto, ProductFilter
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_categories::InMemoryCategoryRepository;
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! let categories = InMemoryCategoryRepository::new();
//! let repository = InMemoryProductRepository::new(categories.clone());
//! let service = ProductService::new(repository, categories);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use filter::ProductPredicate;
pub use models::{Product, ProductDraft, ProductDto, ProductFilter, ProductSortField};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
