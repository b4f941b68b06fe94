pub mod maintenance;
pub mod moto;

pub use maintenance::MaintenanceService;
pub use moto::{ListingConfig, MotoQuery, MotoService};
