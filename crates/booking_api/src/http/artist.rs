use actix_web::{
    Responder, Scope,
    web::{self, Form, Json, Path},
};
use booking_lib::{artist, forms::ArtistForm, time};

use crate::{
    BookingResult, BookingResultExt as _,
    utils::{ExtractDbConn, created, json},
};

use super::{Confirmation, Deleted, SearchBody, SearchResponse};

pub fn artist_scope() -> Scope {
    web::scope("/artists")
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
    let artists = artist::list(&conn).await?;
    json(artists)
}

async fn search(
    ExtractDbConn(conn): ExtractDbConn,
    Form(body): Form<SearchBody>,
) -> BookingResult<impl Responder> {
    let results = artist::search(&conn, &body.search_term, time::now()).await?;
    json(SearchResponse {
        search_term: body.search_term,
        results,
    })
}

async fn detail(
    ExtractDbConn(conn): ExtractDbConn,
    id: Path<i32>,
) -> BookingResult<impl Responder> {
    let artist = artist::detail(&conn, id.into_inner(), time::now()).await?;
    json(artist)
}

async fn create_form() -> BookingResult<impl Responder> {
    json(ArtistForm::default().describe())
}

async fn create(
    ExtractDbConn(conn): ExtractDbConn,
    Json(form): Json<ArtistForm>,
) -> BookingResult<impl Responder> {
    let artist = artist::create(&conn, &form).await.echo_form(&form)?;
    created(Confirmation {
        id: artist.id,
        message: format!("Artist {} was successfully listed!", artist.name),
        location: format!("/artists/{}", artist.id),
    })
}

async fn edit_form(
    ExtractDbConn(conn): ExtractDbConn,
    id: Path<i32>,
) -> BookingResult<impl Responder> {
    let form = artist::edit_form(&conn, id.into_inner()).await?;
    json(form.describe())
}

async fn edit(
    ExtractDbConn(conn): ExtractDbConn,
    id: Path<i32>,
    Json(form): Json<ArtistForm>,
) -> BookingResult<impl Responder> {
    let artist = artist::update(&conn, id.into_inner(), &form)
        .await
        .echo_form(&form)?;
    json(Confirmation {
        id: artist.id,
        message: format!("Artist {} was successfully updated!", artist.name),
        location: format!("/artists/{}", artist.id),
    })
}

async fn delete(
    ExtractDbConn(conn): ExtractDbConn,
    id: Path<i32>,
) -> BookingResult<impl Responder> {
    let id = id.into_inner();
    artist::delete(&conn, id).await?;
    json(Deleted {
        id,
        message: format!("Artist {id} was successfully deleted."),
    })
}
