pub mod auth;
pub mod health;
pub mod maintenances;
pub mod metrics;
pub mod motos;
pub mod request_id;

/// Collection paths, also used to build resource links
pub const MOTOS_PATH: &str = "/api/v1/motos";
pub const MAINTENANCES_PATH: &str = "/api/v1/maintenances";
