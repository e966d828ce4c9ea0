use booking_lib::{Database, sync};
use entity::{artist_genres, artists, shows, venue_genres, venues};
use sea_orm::{DbErr, EntityTrait as _};

#[derive(clap::Args)]
pub struct ClearCommand {
    /// Only deletes the shows, keeping the venues and artists.
    #[arg(long)]
    shows_only: bool,
}

pub async fn clear(db: Database, ClearCommand { shows_only }: ClearCommand) -> anyhow::Result<()> {
    let deleted = sync::transaction(&db.sql_conn, async |txn| {
        let mut deleted = shows::Entity::delete_many().exec(txn).await?.rows_affected;

        if !shows_only {
            deleted += venue_genres::Entity::delete_many()
                .exec(txn)
                .await?
                .rows_affected;
            deleted += artist_genres::Entity::delete_many()
                .exec(txn)
                .await?
                .rows_affected;
            deleted += venues::Entity::delete_many().exec(txn).await?.rows_affected;
            deleted += artists::Entity::delete_many().exec(txn).await?.rows_affected;
        }

        Ok::<_, DbErr>(deleted)
    })
    .await?;

    tracing::info!("Deleted {deleted} rows");

    Ok(())
}
