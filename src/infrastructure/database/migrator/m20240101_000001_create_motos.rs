//! Migration to create motos table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Motos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Motos::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Motos::Plate).string_len(8).not_null())
                    .col(ColumnDef::new(Motos::Model).string_len(60).not_null())
                    .col(ColumnDef::new(Motos::PlateSearch).string().not_null())
                    .col(ColumnDef::new(Motos::ModelSearch).string().not_null())
                    .col(ColumnDef::new(Motos::Year).integer().not_null())
                    .col(ColumnDef::new(Motos::Chassis).string_len(64).null())
                    .col(
                        ColumnDef::new(Motos::Status)
                            .string_len(20)
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(Motos::Latitude).double().null())
                    .col(ColumnDef::new(Motos::Longitude).double().null())
                    .col(
                        ColumnDef::new(Motos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Motos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_motos_plate")
                    .table(Motos::Table)
                    .col(Motos::Plate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_motos_model")
                    .table(Motos::Table)
                    .col(Motos::ModelSearch)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Motos::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Motos {
    Table,
    Id,
    Plate,
    Model,
    PlateSearch,
    ModelSearch,
    Year,
    Chassis,
    Status,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}
