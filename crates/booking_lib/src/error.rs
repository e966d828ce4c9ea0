//! A module containing the [`BookingError`] enum, which contains various basic error types.

use crate::forms::FieldErrors;

/// Represents any type of error that could happen when using this crate.
#[derive(thiserror::Error, Debug)]
#[rustfmt::skip]
pub enum BookingError {
    // --------
    // --- Internal server errors
    // --------

    /// An error from the database.
    #[error(transparent)]
    DbError(#[from] sea_orm::DbErr),

    // --------
    // --- Logical errors
    // --------

    /// The venue with the provided ID was not found.
    #[error("venue with id `{0}` not found in database")]
    VenueNotFound(
        /// The venue ID.
        i32,
    ),
    /// The artist with the provided ID was not found.
    #[error("artist with id `{0}` not found in database")]
    ArtistNotFound(
        /// The artist ID.
        i32,
    ),
    /// A submitted form didn't pass the validation.
    #[error("invalid form: {0}")]
    InvalidForm(
        /// The errors of each field.
        FieldErrors,
    ),
    /// The artist is already booked at the venue.
    #[error("artist with id `{1}` is already booked at venue with id `{0}`")]
    ShowAlreadyBooked(
        /// The venue ID.
        i32,
        /// The artist ID.
        i32,
    ),
}

/// Represents the result of a computation that could return a [`BookingError`].
pub type BookingResult<T = ()> = Result<T, BookingError>;
