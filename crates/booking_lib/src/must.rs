//! This module contains utility functions used to retrieve some objects from the database,
//! that must exist. This is why it is called `must`.
//!
//! When such an object doesn't exist, the returned value isn't `Option::None` but the
//! corresponding error (for example, [`BookingError::VenueNotFound`]), so the handlers can
//! propagate it with the `?` operator.

use entity::{artists, venues};
use sea_orm::{ConnectionTrait, EntityTrait as _};

use crate::error::{BookingError, BookingResult};

/// Returns the venue in the database bound to the provided ID.
pub async fn have_venue<C: ConnectionTrait>(
    conn: &C,
    venue_id: i32,
) -> BookingResult<venues::Model> {
    venues::Entity::find_by_id(venue_id)
        .one(conn)
        .await?
        .ok_or(BookingError::VenueNotFound(venue_id))
}

/// Returns the artist in the database bound to the provided ID.
pub async fn have_artist<C: ConnectionTrait>(
    conn: &C,
    artist_id: i32,
) -> BookingResult<artists::Model> {
    artists::Entity::find_by_id(artist_id)
        .one(conn)
        .await?
        .ok_or(BookingError::ArtistNotFound(artist_id))
}
