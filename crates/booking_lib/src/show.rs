//! This module contains the queries related to the shows: the listing of every show, the
//! amount of upcoming shows of the venues and artists, and the booking of a new show.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use entity::{artists, shows, venues};
use sea_orm::{
    ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _, FromQueryResult,
    QueryFilter as _, QueryOrder as _, QuerySelect as _, TransactionTrait,
};
use serde::Serialize;

use crate::{
    Listed, WithUpcomingCount,
    error::{BookingError, BookingResult},
    forms::{ShowForm, ValidShow},
    must, sync,
    time::ShowTiming,
};

/// An item of the show listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct ShowItem {
    /// The ID of the venue hosting the show.
    pub venue_id: i32,
    /// The name of the venue.
    pub venue_name: String,
    /// The ID of the artist playing the show.
    pub artist_id: i32,
    /// The name of the artist.
    pub artist_name: String,
    /// The picture of the artist.
    pub artist_image_link: Option<String>,
    /// The start time of the show, in UTC.
    pub start_time: NaiveDateTime,
}

/// Returns every show with its venue and artist, ordered by start time.
pub async fn list<C: ConnectionTrait>(conn: &C) -> BookingResult<Vec<ShowItem>> {
    let shows = shows::Entity::find()
        .inner_join(venues::Entity)
        .inner_join(artists::Entity)
        .select_only()
        .column(shows::Column::VenueId)
        .column_as(venues::Column::Name, "venue_name")
        .column(shows::Column::ArtistId)
        .column_as(artists::Column::Name, "artist_name")
        .column_as(artists::Column::ImageLink, "artist_image_link")
        .column(shows::Column::StartTime)
        .order_by_asc(shows::Column::StartTime)
        .order_by_asc(shows::Column::VenueId)
        .order_by_asc(shows::Column::ArtistId)
        .into_model()
        .all(conn)
        .await?;

    Ok(shows)
}

#[derive(FromQueryResult)]
struct OwnerCount {
    owner_id: i32,
    num: i64,
}

/// The amount of upcoming shows of each venue or artist.
///
/// A venue or artist without any upcoming show isn't stored, and has a count of 0.
#[derive(Debug, Default)]
pub struct UpcomingCounts(HashMap<i32, u64>);

impl UpcomingCounts {
    /// Returns the amount of upcoming shows of the venue or artist with the provided ID.
    pub fn of(&self, id: i32) -> u64 {
        self.0.get(&id).copied().unwrap_or_default()
    }

    /// Attaches the amount of upcoming shows to the listed venue or artist.
    pub fn attach(&self, Listed { id, name }: Listed) -> WithUpcomingCount {
        WithUpcomingCount {
            id,
            name,
            num_upcoming_shows: self.of(id),
        }
    }
}

/// Counts the upcoming shows of every venue or artist, in a single grouped query.
///
/// The `owner` column is either [`shows::Column::VenueId`] or [`shows::Column::ArtistId`].
pub async fn upcoming_counts<C: ConnectionTrait>(
    conn: &C,
    owner: shows::Column,
    now: NaiveDateTime,
) -> BookingResult<UpcomingCounts> {
    let counts = shows::Entity::find()
        .select_only()
        .column_as(owner, "owner_id")
        .column_as(owner.count(), "num")
        .filter(shows::Column::StartTime.gte(now))
        .group_by(owner)
        .into_model::<OwnerCount>()
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.owner_id, c.num.max(0) as u64))
        .collect();

    Ok(UpcomingCounts(counts))
}

/// The shows of a venue or artist, split between the past and the upcoming ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitShows<T> {
    /// The shows that started before now, by start time.
    pub past_shows: Vec<T>,
    /// The shows starting from now, by start time.
    pub upcoming_shows: Vec<T>,
    /// The length of `past_shows`.
    pub past_shows_count: usize,
    /// The length of `upcoming_shows`.
    pub upcoming_shows_count: usize,
}

impl<T> SplitShows<T> {
    /// Splits the provided shows relative to `now`, keeping their order.
    pub fn new(
        shows: Vec<T>,
        now: NaiveDateTime,
        start_time: impl Fn(&T) -> NaiveDateTime,
    ) -> Self {
        let (past_shows, upcoming_shows): (Vec<_>, Vec<_>) = shows
            .into_iter()
            .partition(|show| ShowTiming::of(start_time(show), now) == ShowTiming::Past);

        Self {
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Books the artist at the venue, with the provided show form.
///
/// The artist and the venue must exist, and the artist mustn't be already booked at the venue.
#[tracing::instrument(skip(conn))]
pub async fn create<C: TransactionTrait>(conn: &C, form: &ShowForm) -> BookingResult<ValidShow> {
    let show = form.to_valid().map_err(BookingError::InvalidForm)?;

    sync::transaction(conn, async |txn| {
        must::have_artist(txn, show.artist_id).await?;
        must::have_venue(txn, show.venue_id).await?;

        let booked = shows::Entity::find_by_id((show.venue_id, show.artist_id))
            .one(txn)
            .await?
            .is_some();
        if booked {
            return Err(BookingError::ShowAlreadyBooked(show.venue_id, show.artist_id));
        }

        shows::Entity::insert(shows::ActiveModel {
            venue_id: Set(show.venue_id),
            artist_id: Set(show.artist_id),
            start_time: Set(show.start_time),
        })
        .exec_without_returning(txn)
        .await?;

        tracing::info!(
            "booked artist {} at venue {}",
            show.artist_id,
            show.venue_id
        );

        Ok(show)
    })
    .await
}
