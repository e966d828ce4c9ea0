//! This module contains the queries related to the artists.

use chrono::NaiveDateTime;
use entity::{
    artist_genres, artists, shows,
    types::{Genre, UsState},
    venues,
};
use sea_orm::{
    ActiveModelTrait as _,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait as _, ConnectionTrait, DatabaseTransaction, EntityTrait as _, FromQueryResult,
    QueryFilter as _, QueryOrder as _, QuerySelect as _, TransactionTrait,
};
use serde::Serialize;

use crate::{
    Listed,
    error::{BookingError, BookingResult},
    forms::{ArtistForm, ValidArtist},
    must,
    search::{NameQuery, SearchResults},
    show::{self, SplitShows},
    sync,
};

/// Returns every artist, ordered by name.
pub async fn list<C: ConnectionTrait>(conn: &C) -> BookingResult<Vec<Listed>> {
    let artists = artists::Entity::find()
        .select_only()
        .columns([artists::Column::Id, artists::Column::Name])
        .order_by_asc(artists::Column::Name)
        .order_by_asc(artists::Column::Id)
        .into_model()
        .all(conn)
        .await?;
    Ok(artists)
}

/// Returns the artists with a name containing the provided term, ignoring the case.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    term: &str,
    now: NaiveDateTime,
) -> BookingResult<SearchResults> {
    let artists = artists::Entity::find()
        .select_only()
        .columns([artists::Column::Id, artists::Column::Name])
        .order_by_asc(artists::Column::Name)
        .order_by_asc(artists::Column::Id)
        .into_model::<Listed>()
        .all(conn)
        .await?;
    let found = NameQuery::new(term).filter(artists);

    let counts = show::upcoming_counts(conn, shows::Column::ArtistId, now).await?;

    Ok(found
        .into_iter()
        .map(|artist| counts.attach(artist))
        .collect::<Vec<_>>()
        .into())
}

/// A show of an artist, with the venue hosting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct ArtistShow {
    /// The ID of the venue.
    pub venue_id: i32,
    /// The name of the venue.
    pub venue_name: String,
    /// The picture of the venue.
    pub venue_image_link: Option<String>,
    /// The start time of the show, in UTC.
    pub start_time: NaiveDateTime,
}

/// The full page of an artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    /// The artist ID.
    pub id: i32,
    /// The name of the artist.
    pub name: String,
    /// The genres, in their stored order.
    pub genres: Vec<Genre>,
    /// The home city of the artist.
    pub city: String,
    /// The state of the artist.
    pub state: UsState,
    /// The phone number.
    pub phone: Option<String>,
    /// The URL of the website.
    pub website: Option<String>,
    /// The URL of the Facebook page.
    pub facebook_link: Option<String>,
    /// Whether the artist is looking for venues.
    pub seeking_venue: bool,
    /// The text shown when the artist is looking for venues.
    pub seeking_description: Option<String>,
    /// The URL of the picture of the artist.
    pub image_link: Option<String>,
    /// The past and upcoming shows of the artist.
    #[serde(flatten)]
    pub shows: SplitShows<ArtistShow>,
}

async fn genres_of<C: ConnectionTrait>(conn: &C, artist_id: i32) -> BookingResult<Vec<Genre>> {
    let genres = artist_genres::Entity::find()
        .filter(artist_genres::Column::ArtistId.eq(artist_id))
        .order_by_asc(artist_genres::Column::Position)
        .all(conn)
        .await?
        .into_iter()
        .map(|row| row.genre)
        .collect();
    Ok(genres)
}

/// Returns the full page of the artist with the provided ID.
pub async fn detail<C: ConnectionTrait>(
    conn: &C,
    artist_id: i32,
    now: NaiveDateTime,
) -> BookingResult<ArtistDetail> {
    let artist = must::have_artist(conn, artist_id).await?;
    let genres = genres_of(conn, artist_id).await?;

    let shows = shows::Entity::find()
        .inner_join(venues::Entity)
        .filter(shows::Column::ArtistId.eq(artist_id))
        .select_only()
        .column(shows::Column::VenueId)
        .column_as(venues::Column::Name, "venue_name")
        .column_as(venues::Column::ImageLink, "venue_image_link")
        .column(shows::Column::StartTime)
        .order_by_asc(shows::Column::StartTime)
        .order_by_asc(shows::Column::VenueId)
        .into_model::<ArtistShow>()
        .all(conn)
        .await?;

    Ok(ArtistDetail {
        id: artist.id,
        name: artist.name,
        genres,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        website: artist.website,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        shows: SplitShows::new(shows, now, |show| show.start_time),
    })
}

/// Returns the latest listed artists, newest first.
pub async fn latest<C: ConnectionTrait>(conn: &C, limit: u64) -> BookingResult<Vec<Listed>> {
    let artists = artists::Entity::find()
        .select_only()
        .columns([artists::Column::Id, artists::Column::Name])
        .order_by_desc(artists::Column::Id)
        .limit(limit)
        .into_model()
        .all(conn)
        .await?;
    Ok(artists)
}

fn into_active_model(id: Option<i32>, artist: ValidArtist) -> (artists::ActiveModel, Vec<Genre>) {
    let model = artists::ActiveModel {
        id: id.map_or(NotSet, Unchanged),
        name: Set(artist.name),
        city: Set(artist.city),
        state: Set(artist.state),
        phone: Set(artist.phone),
        image_link: Set(artist.image_link),
        facebook_link: Set(artist.facebook_link),
        website: Set(artist.website),
        seeking_venue: Set(artist.seeking_venue),
        seeking_description: Set(artist.seeking_description),
    };
    (model, artist.genres)
}

async fn insert_genres(
    txn: &DatabaseTransaction,
    artist_id: i32,
    genres: &[Genre],
) -> BookingResult<()> {
    if genres.is_empty() {
        return Ok(());
    }

    let rows = genres
        .iter()
        .enumerate()
        .map(|(position, genre)| artist_genres::ActiveModel {
            artist_id: Set(artist_id),
            position: Set(position as i32),
            genre: Set(*genre),
        });

    artist_genres::Entity::insert_many(rows)
        .exec_without_returning(txn)
        .await?;

    Ok(())
}

/// Lists a new artist from the submitted form, and returns its ID and name.
#[tracing::instrument(skip(conn))]
pub async fn create<C: TransactionTrait>(conn: &C, form: &ArtistForm) -> BookingResult<Listed> {
    let artist = form.to_valid().map_err(BookingError::InvalidForm)?;
    let name = artist.name.clone();
    let (model, genres) = into_active_model(None, artist);

    sync::transaction(conn, async |txn| {
        let id = artists::Entity::insert(model)
            .exec(txn)
            .await?
            .last_insert_id;
        insert_genres(txn, id, &genres).await?;

        tracing::info!("listed artist {id}");

        Ok(Listed { id, name })
    })
    .await
}

/// Replaces the fields and genres of the artist with the provided ID with the submitted form.
#[tracing::instrument(skip(conn))]
pub async fn update<C>(conn: &C, artist_id: i32, form: &ArtistForm) -> BookingResult<Listed>
where
    C: ConnectionTrait + TransactionTrait,
{
    must::have_artist(conn, artist_id).await?;
    let artist = form.to_valid().map_err(BookingError::InvalidForm)?;
    let name = artist.name.clone();
    let (model, genres) = into_active_model(Some(artist_id), artist);

    sync::transaction(conn, async |txn| {
        model.update(txn).await?;

        artist_genres::Entity::delete_many()
            .filter(artist_genres::Column::ArtistId.eq(artist_id))
            .exec(txn)
            .await?;
        insert_genres(txn, artist_id, &genres).await?;

        Ok(Listed {
            id: artist_id,
            name,
        })
    })
    .await
}

/// Deletes the artist with the provided ID, with its genres and shows.
#[tracing::instrument(skip(conn))]
pub async fn delete<C: TransactionTrait>(conn: &C, artist_id: i32) -> BookingResult<()> {
    sync::transaction(conn, async |txn| {
        shows::Entity::delete_many()
            .filter(shows::Column::ArtistId.eq(artist_id))
            .exec(txn)
            .await?;
        artist_genres::Entity::delete_many()
            .filter(artist_genres::Column::ArtistId.eq(artist_id))
            .exec(txn)
            .await?;

        let deleted = artists::Entity::delete_by_id(artist_id).exec(txn).await?;
        if deleted.rows_affected == 0 {
            return Err(BookingError::ArtistNotFound(artist_id));
        }

        tracing::info!("deleted artist {artist_id}");

        Ok(())
    })
    .await
}

/// Returns the artist form filled with the current values of the artist with the provided ID.
pub async fn edit_form<C: ConnectionTrait>(conn: &C, artist_id: i32) -> BookingResult<ArtistForm> {
    let artist = must::have_artist(conn, artist_id).await?;
    let genres = genres_of(conn, artist_id).await?;

    Ok(ArtistForm {
        name: artist.name,
        city: artist.city,
        state: artist.state.to_string(),
        phone: artist.phone,
        genres: genres.iter().map(ToString::to_string).collect(),
        image_link: artist.image_link,
        facebook_link: artist.facebook_link,
        website: artist.website,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
    })
}
