//! Module used to serve the routes of the booking website. Each submodule is specific
//! for a route segment.

use actix_web::{
    HttpRequest, Responder, Scope,
    web::{self, FormConfig, JsonConfig, PathConfig},
};
use booking_lib::{Database, Listed, search::SearchResults};
use mkenv::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{BookingErrorKind, BookingResult, Res, utils::json};

use self::artist::artist_scope;
use self::show::show_scope;
use self::venue::venue_scope;

mod artist;
mod show;
mod venue;

fn malformed_request<E: ToString>(err: E, _: &HttpRequest) -> actix_web::Error {
    BookingErrorKind::MalformedRequest(err.to_string()).into()
}

pub fn api_route() -> Scope {
    let json_config = JsonConfig::default()
        .limit(crate::env().json_limit.get())
        .error_handler(malformed_request);
    let form_config = FormConfig::default().error_handler(malformed_request);
    // An ID that can't be parsed can't match any venue or artist
    let path_config =
        PathConfig::default().error_handler(|_, _| BookingErrorKind::EndpointNotFound.into());

    web::scope("")
        .app_data(json_config)
        .app_data(form_config)
        .app_data(path_config)
        .route("/", web::get().to(home))
        .service(venue_scope())
        .service(artist_scope())
        .service(show_scope())
}

/// The confirmation sent after listing or editing a venue or artist.
#[derive(Serialize)]
struct Confirmation {
    id: i32,
    message: String,
    location: String,
}

/// The confirmation sent after deleting a venue or artist.
#[derive(Serialize)]
struct Deleted {
    id: i32,
    message: String,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(default)]
    search_term: String,
}

#[derive(Serialize)]
struct SearchResponse {
    search_term: String,
    #[serde(flatten)]
    results: SearchResults,
}

#[derive(Serialize)]
struct HomeResponse {
    service_name: &'static str,
    api_version: &'static str,
    latest_venues: Vec<Listed>,
    latest_artists: Vec<Listed>,
}

async fn home(db: Res<Database>) -> BookingResult<impl Responder> {
    let limit = booking_lib::env().latest_listings.get();

    let latest_venues = booking_lib::venue::latest(&db.sql_conn, limit).await?;
    let latest_artists = booking_lib::artist::latest(&db.sql_conn, limit).await?;

    json(HomeResponse {
        service_name: "Fyyur",
        api_version: env!("CARGO_PKG_VERSION"),
        latest_venues,
        latest_artists,
    })
}
