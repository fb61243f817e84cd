//! Create rollercoaster table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rollercoaster::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rollercoaster::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Rollercoaster::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Rollercoaster::Year).integer().not_null())
                    .col(ColumnDef::new(Rollercoaster::Height).double().not_null())
                    .col(ColumnDef::new(Rollercoaster::Length).double().not_null())
                    .col(
                        ColumnDef::new(Rollercoaster::Manufacturer)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Rollercoaster::Model).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Rollercoaster::Inversions)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Rollercoaster::Speed).double().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rollercoaster::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Rollercoaster {
    Table,
    Id,
    Name,
    Year,
    Height,
    Length,
    Manufacturer,
    Model,
    Inversions,
    Speed,
}
