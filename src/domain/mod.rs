pub mod maintenance;
pub mod moto;
pub mod repositories;
pub mod user;

pub use maintenance::{Maintenance, MaintenanceInput, MaintenanceRepository, MaintenanceStatus};
pub use moto::{Moto, MotoFilter, MotoInput, MotoRepository, MotoSortField, MotoStatus};
pub use repositories::RepositoryProvider;
pub use user::{CreateUserDto, User, UserRepository};

pub use crate::shared::errors::{DomainError, DomainResult};
