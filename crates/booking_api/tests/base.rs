#![allow(dead_code)]

use std::fmt;

use actix_http::Request;
use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{Service, ServiceResponse},
    middleware, test,
};
use booking_lib::Database;
use chrono::NaiveDateTime;
use entity::{
    artist_genres, artists, shows,
    types::{Genre, UsState},
    venue_genres, venues,
};
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait as _};
use test_env::IntoResult;
use tracing_actix_web::TracingLogger;

use booking_api_lib::{configure, init_env};

#[derive(Debug, serde::Deserialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub r#type: i32,
    pub message: String,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
    #[serde(default)]
    pub form: Option<serde_json::Value>,
}

pub async fn with_db<F, R>(test: F) -> anyhow::Result<<R as IntoResult>::Out>
where
    F: AsyncFnOnce(Database) -> R,
    R: IntoResult,
{
    test_env::wrap(async |db| {
        init_env()?;
        test(db).await.into_result()
    })
    .await
}

pub async fn get_app(
    db: Database,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(middleware::from_fn(configure::fit_request_id))
            .wrap(TracingLogger::<configure::RootSpanBuilder>::new())
            .configure(|cfg| configure::configure(cfg, db.clone())),
    )
    .await
}

#[derive(Debug)]
pub enum ApiError {
    InvalidJson(Vec<u8>, serde_json::Error),
    UnexpectedJson(serde_json::Value, serde_json::Error),
    Error { r#type: i32, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidJson(raw, deser_err) => match str::from_utf8(raw) {
                Ok(s) => write!(
                    f,
                    "Invalid JSON returned by the API: {s}\nError when deserializing: {deser_err}"
                ),
                Err(_) => write!(
                    f,
                    "Invalid JSON returned by the API, with some non-UTF8 characters: {raw:?}"
                ),
            },
            ApiError::UnexpectedJson(json, deser_err) => {
                write!(
                    f,
                    "Unexpected JSON returned by the API:\n{json:#}\nError when deserializing: {deser_err}"
                )
            }
            ApiError::Error { r#type, message } => {
                f.write_str("Error returned from API: ")?;
                f.debug_map()
                    .entry(&"type", r#type)
                    .entry(&"message", message)
                    .finish()
            }
        }
    }
}

impl std::error::Error for ApiError {}

pub fn try_from_slice<'de, T>(slice: &'de [u8]) -> Result<T, ApiError>
where
    T: serde::Deserialize<'de>,
{
    match serde_json::from_slice(slice) {
        Ok(t) => Ok(t),
        Err(e) => match serde_json::from_slice::<serde_json::Value>(slice) {
            Ok(json) => match serde_json::from_value::<ErrorResponse>(json.clone()) {
                Ok(err) => Err(ApiError::Error {
                    r#type: err.r#type,
                    message: err.message.to_owned(),
                }),
                Err(_) => Err(ApiError::UnexpectedJson(json, e)),
            },
            Err(e) => Err(ApiError::InvalidJson(slice.to_vec(), e)),
        },
    }
}

pub fn days_from_now(days: i64) -> NaiveDateTime {
    chrono::Utc::now().naive_utc() + chrono::Duration::days(days)
}

pub fn date(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|e| panic!("invalid test date `{s}`: {e}"))
}

pub async fn insert_venue<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    city: &str,
    state: UsState,
    genres: &[Genre],
) -> anyhow::Result<i32> {
    let venue = venues::ActiveModel {
        name: Set(name.to_owned()),
        city: Set(city.to_owned()),
        state: Set(state),
        address: Set("1015 Folsom Street".to_owned()),
        seeking_talent: Set(false),
        ..Default::default()
    };
    let venue_id = venues::Entity::insert(venue).exec(conn).await?.last_insert_id;

    for (position, genre) in genres.iter().enumerate() {
        venue_genres::Entity::insert(venue_genres::ActiveModel {
            venue_id: Set(venue_id),
            position: Set(position as _),
            genre: Set(*genre),
        })
        .exec_without_returning(conn)
        .await?;
    }

    Ok(venue_id)
}

pub async fn insert_artist<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    genres: &[Genre],
) -> anyhow::Result<i32> {
    let artist = artists::ActiveModel {
        name: Set(name.to_owned()),
        city: Set("San Francisco".to_owned()),
        state: Set(UsState::California),
        image_link: Set(Some(format!("https://images.example.com/{}.jpg", name.len()))),
        seeking_venue: Set(false),
        ..Default::default()
    };
    let artist_id = artists::Entity::insert(artist)
        .exec(conn)
        .await?
        .last_insert_id;

    for (position, genre) in genres.iter().enumerate() {
        artist_genres::Entity::insert(artist_genres::ActiveModel {
            artist_id: Set(artist_id),
            position: Set(position as _),
            genre: Set(*genre),
        })
        .exec_without_returning(conn)
        .await?;
    }

    Ok(artist_id)
}

pub async fn insert_show<C: ConnectionTrait>(
    conn: &C,
    venue_id: i32,
    artist_id: i32,
    start_time: NaiveDateTime,
) -> anyhow::Result<()> {
    shows::Entity::insert(shows::ActiveModel {
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        start_time: Set(start_time),
    })
    .exec_without_returning(conn)
    .await?;
    Ok(())
}
