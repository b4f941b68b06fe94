//! Demo data for empty databases.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::config::SeedSection;
use crate::domain::maintenance::{Maintenance, MaintenanceInput, MaintenanceStatus};
use crate::domain::moto::{Moto, MotoInput, MotoStatus};
use crate::domain::user::normalize_email;
use crate::domain::{CreateUserDto, DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::crypto::password::hash_password_with_cost;

/// What the seeder inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub motos: usize,
    pub maintenances: usize,
}

fn demo_fleet() -> [(&'static str, &'static str, i32, MotoStatus); 3] {
    [
        ("ABC1D23", "CG 160", 2022, MotoStatus::Available),
        ("EFG4H56", "NMax 160", 2023, MotoStatus::Available),
        ("IJK7L89", "Pop 110i", 2021, MotoStatus::Maintenance),
    ]
}

/// Insert the demo user, fleet and maintenance record. Each table is only
/// touched when it is empty, so running this twice is harmless.
pub async fn seed_demo_data(
    repos: &dyn RepositoryProvider,
    seed: &SeedSection,
    bcrypt_cost: u32,
) -> DomainResult<SeedReport> {
    let mut report = SeedReport::default();

    if repos.users().count_users().await? == 0 {
        let password_hash = hash_password_with_cost(&seed.demo_password, bcrypt_cost)
            .map_err(|e| DomainError::Storage(format!("failed to hash password: {}", e)))?;
        repos
            .users()
            .create_user(CreateUserDto {
                id: uuid::Uuid::new_v4(),
                name: seed.demo_name.trim().to_string(),
                email: normalize_email(&seed.demo_email),
                password_hash,
            })
            .await?;
        report.users = 1;
    }

    if repos.motos().count_all().await? == 0 {
        let now = Utc::now();
        let mut in_maintenance = None;
        for (plate, model, year, status) in demo_fleet() {
            let moto = repos
                .motos()
                .insert(Moto::new(
                    MotoInput {
                        plate: plate.to_string(),
                        model: model.to_string(),
                        year,
                        chassis: None,
                        status,
                        latitude: None,
                        longitude: None,
                    },
                    now,
                ))
                .await?;
            if status == MotoStatus::Maintenance {
                in_maintenance = Some(moto.id);
            }
            report.motos += 1;
        }

        if let Some(moto_id) = in_maintenance {
            if repos.maintenances().count_all().await? == 0 {
                repos
                    .maintenances()
                    .insert(Maintenance::new(MaintenanceInput {
                        moto_id,
                        date: now - Duration::days(1),
                        kind: Some("Revisao".to_string()),
                        description: Some("Troca de óleo e inspeção".to_string()),
                        status: MaintenanceStatus::Pending,
                        cost: Some(Decimal::new(120, 0)),
                    }))
                    .await?;
                report.maintenances = 1;
            }
        }
    }

    if report != SeedReport::default() {
        info!(
            users = report.users,
            motos = report.motos,
            maintenances = report.maintenances,
            "Demo data seeded"
        );
    }
    Ok(report)
}
