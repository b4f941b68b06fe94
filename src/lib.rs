//! # Mottu API
//!
//! REST API for a motorcycle rental fleet: motos with filtered, sorted and
//! paged listings carrying navigation links, their maintenance records, and
//! JWT-authenticated users.
//!
//! ## Layout
//!
//! - **shared**: listing query engine, domain error, retry and shutdown helpers
//! - **domain**: records, input normalisation and repository traits
//! - **application**: services (motos, maintenances, auth) and demo seeding
//! - **infrastructure**: SeaORM persistence, migrations, JWT and bcrypt
//! - **interfaces**: axum router, handlers, DTOs and OpenAPI docs
//! - **server**: lifecycle of a running instance

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::http::create_api_router;
pub use server::{init_tracing, ServerHandle, ServerOptions};
