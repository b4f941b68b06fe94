//! Maintenance aggregate

pub mod model;
pub mod repository;

pub use model::{Maintenance, MaintenanceInput, MaintenanceStatus, DEFAULT_KIND};
pub use repository::MaintenanceRepository;
