//! Migration to create maintenances table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Maintenances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Maintenances::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Maintenances::MotoId).string_len(36).not_null())
                    .col(
                        ColumnDef::new(Maintenances::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Maintenances::Kind)
                            .string_len(40)
                            .not_null()
                            .default("Outro"),
                    )
                    .col(ColumnDef::new(Maintenances::Description).text().null())
                    .col(
                        ColumnDef::new(Maintenances::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Maintenances::CostCents).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenances_moto")
                            .from(Maintenances::Table, Maintenances::MotoId)
                            .to(Motos::Table, Motos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenances_moto_id")
                    .table(Maintenances::Table)
                    .col(Maintenances::MotoId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Maintenances::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Maintenances {
    Table,
    Id,
    MotoId,
    Date,
    Kind,
    Description,
    Status,
    CostCents,
}

#[derive(Iden)]
enum Motos {
    Table,
    Id,
}
