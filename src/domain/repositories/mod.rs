//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to the per-aggregate repositories.

use super::maintenance::MaintenanceRepository;
use super::moto::MotoRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let moto = repos.motos().find_by_plate("ABC1D23").await?;
///     let history = repos.maintenances().list(moto.map(|m| m.id)).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn motos(&self) -> &dyn MotoRepository;
    fn maintenances(&self) -> &dyn MaintenanceRepository;
    fn users(&self) -> &dyn UserRepository;
}
