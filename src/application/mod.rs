pub mod identity;
pub mod seed;
pub mod services;

pub use identity::{AuthResult, AuthService};
pub use seed::{seed_demo_data, SeedReport};
pub use services::{ListingConfig, MaintenanceService, MotoQuery, MotoService};
