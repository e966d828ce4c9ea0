use std::{
    convert::Infallible,
    future::{Ready, ready},
    ops::Deref,
};

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use booking_lib::Database;
use sea_orm::DbConn;
use serde::Serialize;

/// Converts the provided body to a `200 OK` JSON responses.
pub fn json<T: Serialize, E>(obj: T) -> Result<HttpResponse, E> {
    Ok(HttpResponse::Ok().json(obj))
}

/// Converts the provided body to a `201 Created` JSON responses.
pub fn created<T: Serialize, E>(obj: T) -> Result<HttpResponse, E> {
    Ok(HttpResponse::Created().json(obj))
}

fn app_data<T: Clone + 'static>(req: &HttpRequest) -> T {
    req.app_data::<T>()
        .unwrap_or_else(|| panic!("{} should be present", std::any::type_name::<T>()))
        .clone()
}

/// A resource handler, like [`Data`][d].
///
/// The difference with [`Data`][d] is that it doesn't use an [`Arc`](std::sync::Arc)
/// internally, but the [`Clone`] implementation of the inner type to implement [`FromRequest`].
///
/// [d]: actix_web::web::Data
#[derive(Clone)]
pub struct Res<T>(pub T);

impl<T> Deref for Res<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Clone + 'static> FromRequest for Res<T> {
    type Error = Infallible;

    type Future = Ready<Result<Self, Infallible>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(app_data(req))))
    }
}

/// Extracts the SQL connection pool from the [`Database`] registered in the app data.
pub struct ExtractDbConn(pub DbConn);

impl FromRequest for ExtractDbConn {
    type Error = Infallible;

    type Future = Ready<Result<Self, Infallible>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let db: Database = app_data(req);
        ready(Ok(Self(db.sql_conn)))
    }
}
