mod m20250601_120000_first;
mod m20250601_120500_add_listing_indexes;

use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_120000_first::Migration),
            Box::new(m20250601_120500_add_listing_indexes::Migration),
        ]
    }
}
