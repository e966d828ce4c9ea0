//! This module contains the queries related to the venues.

use chrono::NaiveDateTime;
use entity::{
    artists, shows,
    types::{Genre, UsState},
    venue_genres, venues,
};
use itertools::Itertools as _;
use sea_orm::{
    ActiveModelTrait as _,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait as _, ConnectionTrait, DatabaseTransaction, EntityTrait as _, FromQueryResult,
    QueryFilter as _, QueryOrder as _, QuerySelect as _, TransactionTrait,
};
use serde::Serialize;

use crate::{
    Listed, WithUpcomingCount,
    error::{BookingError, BookingResult},
    forms::{ValidVenue, VenueForm},
    must,
    search::{NameQuery, SearchResults},
    show::{self, SplitShows},
    sync,
};

/// The venues located in the same city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    /// The city name.
    pub city: String,
    /// The state of the city.
    pub state: UsState,
    /// The venues of the city, by name.
    pub venues: Vec<WithUpcomingCount>,
}

/// Returns every venue grouped by city, with their amount of upcoming shows.
///
/// The areas are ordered by state then city, and the venues of an area by name.
pub async fn list_areas<C: ConnectionTrait>(
    conn: &C,
    now: NaiveDateTime,
) -> BookingResult<Vec<Area>> {
    let venues = venues::Entity::find()
        .order_by_asc(venues::Column::State)
        .order_by_asc(venues::Column::City)
        .order_by_asc(venues::Column::Name)
        .order_by_asc(venues::Column::Id)
        .all(conn)
        .await?;

    let counts = show::upcoming_counts(conn, shows::Column::VenueId, now).await?;

    let areas = venues
        .into_iter()
        .chunk_by(|venue| (venue.state, venue.city.clone()));

    let areas = areas
        .into_iter()
        .map(|((state, city), venues)| Area {
            city,
            state,
            venues: venues
                .map(|venue| {
                    counts.attach(Listed {
                        id: venue.id,
                        name: venue.name,
                    })
                })
                .collect(),
        })
        .collect();

    Ok(areas)
}

/// Returns the venues with a name containing the provided term, ignoring the case.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    term: &str,
    now: NaiveDateTime,
) -> BookingResult<SearchResults> {
    let venues = venues::Entity::find()
        .select_only()
        .columns([venues::Column::Id, venues::Column::Name])
        .order_by_asc(venues::Column::Name)
        .order_by_asc(venues::Column::Id)
        .into_model::<Listed>()
        .all(conn)
        .await?;
    let found = NameQuery::new(term).filter(venues);

    let counts = show::upcoming_counts(conn, shows::Column::VenueId, now).await?;

    Ok(found
        .into_iter()
        .map(|venue| counts.attach(venue))
        .collect::<Vec<_>>()
        .into())
}

/// A show of a venue, with the artist playing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct VenueShow {
    /// The ID of the artist.
    pub artist_id: i32,
    /// The name of the artist.
    pub artist_name: String,
    /// The picture of the artist.
    pub artist_image_link: Option<String>,
    /// The start time of the show, in UTC.
    pub start_time: NaiveDateTime,
}

/// The full page of a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    /// The venue ID.
    pub id: i32,
    /// The name of the venue.
    pub name: String,
    /// The genres, in their stored order.
    pub genres: Vec<Genre>,
    /// The street address.
    pub address: String,
    /// The city of the venue.
    pub city: String,
    /// The state of the venue.
    pub state: UsState,
    /// The phone number.
    pub phone: Option<String>,
    /// The URL of the website.
    pub website: Option<String>,
    /// The URL of the Facebook page.
    pub facebook_link: Option<String>,
    /// Whether the venue is looking for artists.
    pub seeking_talent: bool,
    /// The text shown when the venue is looking for artists.
    pub seeking_description: Option<String>,
    /// The URL of the picture of the venue.
    pub image_link: Option<String>,
    /// The past and upcoming shows of the venue.
    #[serde(flatten)]
    pub shows: SplitShows<VenueShow>,
}

async fn genres_of<C: ConnectionTrait>(conn: &C, venue_id: i32) -> BookingResult<Vec<Genre>> {
    let genres = venue_genres::Entity::find()
        .filter(venue_genres::Column::VenueId.eq(venue_id))
        .order_by_asc(venue_genres::Column::Position)
        .all(conn)
        .await?
        .into_iter()
        .map(|row| row.genre)
        .collect();
    Ok(genres)
}

/// Returns the full page of the venue with the provided ID.
pub async fn detail<C: ConnectionTrait>(
    conn: &C,
    venue_id: i32,
    now: NaiveDateTime,
) -> BookingResult<VenueDetail> {
    let venue = must::have_venue(conn, venue_id).await?;
    let genres = genres_of(conn, venue_id).await?;

    let shows = shows::Entity::find()
        .inner_join(artists::Entity)
        .filter(shows::Column::VenueId.eq(venue_id))
        .select_only()
        .column(shows::Column::ArtistId)
        .column_as(artists::Column::Name, "artist_name")
        .column_as(artists::Column::ImageLink, "artist_image_link")
        .column(shows::Column::StartTime)
        .order_by_asc(shows::Column::StartTime)
        .order_by_asc(shows::Column::ArtistId)
        .into_model::<VenueShow>()
        .all(conn)
        .await?;

    Ok(VenueDetail {
        id: venue.id,
        name: venue.name,
        genres,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        website: venue.website,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        shows: SplitShows::new(shows, now, |show| show.start_time),
    })
}

/// Returns the latest listed venues, newest first.
pub async fn latest<C: ConnectionTrait>(conn: &C, limit: u64) -> BookingResult<Vec<Listed>> {
    let venues = venues::Entity::find()
        .select_only()
        .columns([venues::Column::Id, venues::Column::Name])
        .order_by_desc(venues::Column::Id)
        .limit(limit)
        .into_model()
        .all(conn)
        .await?;
    Ok(venues)
}

fn into_active_model(id: Option<i32>, venue: ValidVenue) -> (venues::ActiveModel, Vec<Genre>) {
    let model = venues::ActiveModel {
        id: id.map_or(NotSet, Unchanged),
        name: Set(venue.name),
        city: Set(venue.city),
        state: Set(venue.state),
        address: Set(venue.address),
        phone: Set(venue.phone),
        image_link: Set(venue.image_link),
        facebook_link: Set(venue.facebook_link),
        website: Set(venue.website),
        seeking_talent: Set(venue.seeking_talent),
        seeking_description: Set(venue.seeking_description),
    };
    (model, venue.genres)
}

async fn insert_genres(
    txn: &DatabaseTransaction,
    venue_id: i32,
    genres: &[Genre],
) -> BookingResult<()> {
    if genres.is_empty() {
        return Ok(());
    }

    let rows = genres
        .iter()
        .enumerate()
        .map(|(position, genre)| venue_genres::ActiveModel {
            venue_id: Set(venue_id),
            position: Set(position as i32),
            genre: Set(*genre),
        });

    venue_genres::Entity::insert_many(rows)
        .exec_without_returning(txn)
        .await?;

    Ok(())
}

/// Lists a new venue from the submitted form, and returns its ID and name.
#[tracing::instrument(skip(conn))]
pub async fn create<C: TransactionTrait>(conn: &C, form: &VenueForm) -> BookingResult<Listed> {
    let venue = form.to_valid().map_err(BookingError::InvalidForm)?;
    let name = venue.name.clone();
    let (model, genres) = into_active_model(None, venue);

    sync::transaction(conn, async |txn| {
        let id = venues::Entity::insert(model)
            .exec(txn)
            .await?
            .last_insert_id;
        insert_genres(txn, id, &genres).await?;

        tracing::info!("listed venue {id}");

        Ok(Listed { id, name })
    })
    .await
}

/// Replaces the fields and genres of the venue with the provided ID with the submitted form.
#[tracing::instrument(skip(conn))]
pub async fn update<C>(conn: &C, venue_id: i32, form: &VenueForm) -> BookingResult<Listed>
where
    C: ConnectionTrait + TransactionTrait,
{
    must::have_venue(conn, venue_id).await?;
    let venue = form.to_valid().map_err(BookingError::InvalidForm)?;
    let name = venue.name.clone();
    let (model, genres) = into_active_model(Some(venue_id), venue);

    sync::transaction(conn, async |txn| {
        model.update(txn).await?;

        venue_genres::Entity::delete_many()
            .filter(venue_genres::Column::VenueId.eq(venue_id))
            .exec(txn)
            .await?;
        insert_genres(txn, venue_id, &genres).await?;

        Ok(Listed { id: venue_id, name })
    })
    .await
}

/// Deletes the venue with the provided ID, with its genres and shows.
#[tracing::instrument(skip(conn))]
pub async fn delete<C: TransactionTrait>(conn: &C, venue_id: i32) -> BookingResult<()> {
    sync::transaction(conn, async |txn| {
        shows::Entity::delete_many()
            .filter(shows::Column::VenueId.eq(venue_id))
            .exec(txn)
            .await?;
        venue_genres::Entity::delete_many()
            .filter(venue_genres::Column::VenueId.eq(venue_id))
            .exec(txn)
            .await?;

        let deleted = venues::Entity::delete_by_id(venue_id).exec(txn).await?;
        if deleted.rows_affected == 0 {
            return Err(BookingError::VenueNotFound(venue_id));
        }

        tracing::info!("deleted venue {venue_id}");

        Ok(())
    })
    .await
}

/// Returns the venue form filled with the current values of the venue with the provided ID.
pub async fn edit_form<C: ConnectionTrait>(conn: &C, venue_id: i32) -> BookingResult<VenueForm> {
    let venue = must::have_venue(conn, venue_id).await?;
    let genres = genres_of(conn, venue_id).await?;

    Ok(VenueForm {
        name: venue.name,
        city: venue.city,
        state: venue.state.to_string(),
        address: venue.address,
        phone: venue.phone,
        genres: genres.iter().map(ToString::to_string).collect(),
        image_link: venue.image_link,
        facebook_link: venue.facebook_link,
        website: venue.website,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
    })
}
