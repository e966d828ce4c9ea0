use entity::{artist_genres, artists, shows, venue_genres, venues};
use sea_orm::EntityTrait;
use sea_orm_migration::{prelude::*, sea_orm::Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_database_backend();
        let schema = Schema::new(db);

        create_entity_table(manager, &schema, venues::Entity).await?;
        create_entity_table(manager, &schema, artists::Entity).await?;
        create_entity_table(manager, &schema, venue_genres::Entity).await?;
        create_entity_table(manager, &schema, artist_genres::Entity).await?;
        create_entity_table(manager, &schema, shows::Entity).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_entity_table(manager, shows::Entity).await?;
        drop_entity_table(manager, artist_genres::Entity).await?;
        drop_entity_table(manager, venue_genres::Entity).await?;
        drop_entity_table(manager, artists::Entity).await?;
        drop_entity_table(manager, venues::Entity).await?;

        Ok(())
    }
}

async fn create_entity_table<'a, E: EntityTrait>(
    manager: &'a SchemaManager<'a>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(schema.create_table_from_entity(entity))
        .await
}

async fn drop_entity_table<'a, E: EntityTrait>(
    manager: &'a SchemaManager<'a>,
    entity: E,
) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(entity).take()).await
}
