//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::maintenance::MaintenanceRepository;
use crate::domain::moto::MotoRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepository;

use super::maintenance_repository::SeaOrmMaintenanceRepository;
use super::moto_repository::SeaOrmMotoRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let moto = repos.motos().find_by_plate("ABC1D23").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    motos: SeaOrmMotoRepository,
    maintenances: SeaOrmMaintenanceRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            motos: SeaOrmMotoRepository::new(db.clone()),
            maintenances: SeaOrmMaintenanceRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn motos(&self) -> &dyn MotoRepository {
        &self.motos
    }

    fn maintenances(&self) -> &dyn MaintenanceRepository {
        &self.maintenances
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
