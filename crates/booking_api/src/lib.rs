//! The booking service program library.
//!
//! It serves the listings of the venues and artists, their pages, and the submission of new
//! venues, artists and shows. The queries themselves live in the [`booking_lib`] crate.

pub mod configure;
mod env;
mod error;
mod http;
mod utils;

pub use env::*;
pub use error::*;
pub use http::api_route;
pub use utils::*;
