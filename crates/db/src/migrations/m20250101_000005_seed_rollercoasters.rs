//! Seed the rollercoaster catalogue.
//!
//! Reviews can only be written for coasters that exist, and there is no
//! route for creating coasters, so the catalogue ships with the schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (id, name, year, height m, length m, manufacturer, model, inversions, speed km/h)
type SeedRow = (
    &'static str,
    &'static str,
    i32,
    f64,
    f64,
    &'static str,
    &'static str,
    i32,
    f64,
);

const SEED: &[SeedRow] = &[
    ("rc-steel-vengeance", "Steel Vengeance", 2018, 62.5, 1740.0, "Rocky Mountain Construction", "I-Box Hybrid", 4, 119.0),
    ("rc-fury-325", "Fury 325", 2015, 99.1, 2012.0, "Bolliger & Mabillard", "Giga Coaster", 0, 153.0),
    ("rc-kingda-ka", "Kingda Ka", 2005, 139.0, 950.0, "Intamin", "Accelerator Coaster", 0, 206.0),
    ("rc-formula-rossa", "Formula Rossa", 2010, 52.0, 2070.0, "Intamin", "Accelerator Coaster", 0, 240.0),
    ("rc-the-smiler", "The Smiler", 2013, 30.0, 1170.0, "Gerstlauer", "Infinity Coaster", 14, 85.0),
    ("rc-taron", "Taron", 2016, 30.0, 1320.0, "Intamin", "Blitz Coaster", 0, 117.0),
    ("rc-nemesis", "Nemesis", 1994, 13.0, 716.0, "Bolliger & Mabillard", "Inverted Coaster", 4, 80.0),
    ("rc-millennium-force", "Millennium Force", 2000, 94.5, 2010.0, "Intamin", "Giga Coaster", 0, 150.0),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(Rollercoaster::Table).columns([
            Rollercoaster::Id,
            Rollercoaster::Name,
            Rollercoaster::Year,
            Rollercoaster::Height,
            Rollercoaster::Length,
            Rollercoaster::Manufacturer,
            Rollercoaster::Model,
            Rollercoaster::Inversions,
            Rollercoaster::Speed,
        ]);

        for &(id, name, year, height, length, manufacturer, model, inversions, speed) in SEED {
            insert
                .values([
                    id.into(),
                    name.into(),
                    year.into(),
                    height.into(),
                    length.into(),
                    manufacturer.into(),
                    model.into(),
                    inversions.into(),
                    speed.into(),
                ])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }

        insert.on_conflict(
            OnConflict::column(Rollercoaster::Name)
                .do_nothing()
                .to_owned(),
        );

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let ids: Vec<&str> = SEED.iter().map(|row| row.0).collect();

        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Rollercoaster::Table)
                    .and_where(Expr::col(Rollercoaster::Id).is_in(ids))
                    .to_owned(),
            )
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
