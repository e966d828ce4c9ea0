use actix_web::{
    Responder, Scope,
    web::{self, Json},
};
use booking_lib::{forms::ShowForm, show, time};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    BookingResult, BookingResultExt as _,
    utils::{ExtractDbConn, created, json},
};

pub fn show_scope() -> Scope {
    web::scope("/shows")
        .route("", web::get().to(list))
        .service(
            web::resource("/create")
                .route(web::get().to(create_form))
                .route(web::post().to(create)),
        )
}

async fn list(ExtractDbConn(conn): ExtractDbConn) -> BookingResult<impl Responder> {
    let shows = show::list(&conn).await?;
    json(shows)
}

async fn create_form() -> BookingResult<impl Responder> {
    json(ShowForm::blank(time::now()).describe())
}

#[derive(Serialize)]
struct Booked {
    venue_id: i32,
    artist_id: i32,
    start_time: NaiveDateTime,
    message: &'static str,
}

async fn create(
    ExtractDbConn(conn): ExtractDbConn,
    Json(form): Json<ShowForm>,
) -> BookingResult<impl Responder> {
    let show = show::create(&conn, &form).await.echo_form(&form)?;
    created(Booked {
        venue_id: show.venue_id,
        artist_id: show.artist_id,
        start_time: show.start_time,
        message: "Show was successfully listed!",
    })
}
