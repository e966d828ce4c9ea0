//! The main crate of the booking service.
//!
//! This crate contains the environment setup functions, the database handle, and the queries
//! deciding which venues, artists and shows reach a page. It also owns the validation rules of the
//! submission forms.
//!
//! If you wish to see the crate of the server program itself, take a look
//! at the [`booking_api`](../booking_api_lib/index.html) package.

#![warn(missing_docs)]

mod env;

pub mod artist;
pub mod error;
pub mod forms;
pub mod must;
pub mod pool;
pub mod search;
pub mod show;
pub mod sync;
pub mod time;
pub mod venue;

pub use env::*;
pub use pool::Database;
use rand::Rng as _;

/// Returns a randomly-generated string with the `len` length. It contains alphanumeric characters.
pub fn gen_random_str(len: usize) -> String {
    rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .map(char::from)
        .take(len)
        .collect()
}

/// An entry of a short listing, like the latest listed venues or the artists page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sea_orm::FromQueryResult)]
pub struct Listed {
    /// The ID of the venue or artist.
    pub id: i32,
    /// Its name.
    pub name: String,
}

/// A venue or artist with the amount of shows it has coming up.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct WithUpcomingCount {
    /// The ID of the venue or artist.
    pub id: i32,
    /// Its name.
    pub name: String,
    /// The amount of shows starting from now.
    pub num_upcoming_shows: u64,
}
