//! Create review table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Review::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Review::UserId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Review::RollercoasterId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Review::Rating).double().not_null())
                    .col(ColumnDef::new(Review::ReviewText).string_len(400).not_null())
                    .col(ColumnDef::new(Review::Likes).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Review::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Review::Rating).between(0.0, 10.0))
                    .check(Expr::col(Review::Likes).gte(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_user")
                            .from(Review::Table, Review::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_rollercoaster")
                            .from(Review::Table, Review::RollercoasterId)
                            .to(Rollercoaster::Table, Rollercoaster::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (profile pages, most-liked users)
        manager
            .create_index(
                Index::create()
                    .name("idx_review_user_id")
                    .table(Review::Table)
                    .col(Review::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: rollercoaster_id (coaster pages, average scores)
        manager
            .create_index(
                Index::create()
                    .name("idx_review_rollercoaster_id")
                    .table(Review::Table)
                    .col(Review::RollercoasterId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (trending window)
        manager
            .create_index(
                Index::create()
                    .name("idx_review_created_at")
                    .table(Review::Table)
                    .col(Review::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Review {
    Table,
    Id,
    UserId,
    RollercoasterId,
    Rating,
    ReviewText,
    Likes,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Rollercoaster {
    Table,
    Id,
}
