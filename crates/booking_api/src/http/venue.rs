use actix_web::{
    Responder, Scope,
    web::{self, Form, Json, Path},
};
use booking_lib::{forms::VenueForm, time, venue};

use crate::{
    BookingResult, BookingResultExt as _,
    utils::{ExtractDbConn, created, json},
};

use super::{Confirmation, Deleted, SearchBody, SearchResponse};

pub fn venue_scope() -> Scope {
    web::scope("/venues")
        .route("", web::get().to(list))
        .route("/search", web::post().to(search))
        .service(
            web::resource("/create")
                .route(web::get().to(create_form))
                .route(web::post().to(create)),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(detail))
                .route(web::delete().to(delete)),
        )
        .service(
            web::resource("/{id}/edit")
                .route(web::get().to(edit_form))
                .route(web::post().to(edit)),
        )
}

async fn list(ExtractDbConn(conn): ExtractDbConn) -> BookingResult<impl Responder> {
    let areas = venue::list_areas(&conn, time::now()).await?;
    json(areas)
}

async fn search(
    ExtractDbConn(conn): ExtractDbConn,
    Form(body): Form<SearchBody>,
) -> BookingResult<impl Responder> {
    let results = venue::search(&conn, &body.search_term, time::now()).await?;
    json(SearchResponse {
        search_term: body.search_term,
        results,
    })
}

async fn detail(
    ExtractDbConn(conn): ExtractDbConn,
    id: Path<i32>,
) -> BookingResult<impl Responder> {
    let venue = venue::detail(&conn, id.into_inner(), time::now()).await?;
    json(venue)
}

async fn create_form() -> BookingResult<impl Responder> {
    json(VenueForm::default().describe())
}

async fn create(
    ExtractDbConn(conn): ExtractDbConn,
    Json(form): Json<VenueForm>,
) -> BookingResult<impl Responder> {
    let venue = venue::create(&conn, &form).await.echo_form(&form)?;
    created(Confirmation {
        id: venue.id,
        message: format!("Venue {} was successfully listed!", venue.name),
        location: format!("/venues/{}", venue.id),
    })
}

async fn edit_form(
    ExtractDbConn(conn): ExtractDbConn,
    id: Path<i32>,
) -> BookingResult<impl Responder> {
    let form = venue::edit_form(&conn, id.into_inner()).await?;
    json(form.describe())
}

async fn edit(
    ExtractDbConn(conn): ExtractDbConn,
    id: Path<i32>,
    Json(form): Json<VenueForm>,
) -> BookingResult<impl Responder> {
    let venue = venue::update(&conn, id.into_inner(), &form)
        .await
        .echo_form(&form)?;
    json(Confirmation {
        id: venue.id,
        message: format!("Venue {} was successfully updated!", venue.name),
        location: format!("/venues/{}", venue.id),
    })
}

async fn delete(
    ExtractDbConn(conn): ExtractDbConn,
    id: Path<i32>,
) -> BookingResult<impl Responder> {
    let id = id.into_inner();
    venue::delete(&conn, id).await?;
    json(Deleted {
        id,
        message: format!("Venue {id} was successfully deleted."),
    })
}
