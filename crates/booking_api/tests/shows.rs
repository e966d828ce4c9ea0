use actix_web::test;
use chrono::NaiveDateTime;
use entity::{
    shows,
    types::{Genre, UsState},
};
use sea_orm::{EntityTrait as _, PaginatorTrait as _};
use serde::Deserialize;

mod base;

#[derive(Deserialize, Debug)]
struct ShowItem {
    venue_id: i32,
    venue_name: String,
    artist_id: i32,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: NaiveDateTime,
}

#[derive(Deserialize, Debug)]
struct Booked {
    venue_id: i32,
    artist_id: i32,
    start_time: NaiveDateTime,
    message: String,
}

struct Fixtures {
    hop: i32,
    park: i32,
    guns: i32,
    sax: i32,
}

async fn insert_fixtures(conn: &sea_orm::DbConn) -> anyhow::Result<Fixtures> {
    Ok(Fixtures {
        hop: base::insert_venue(
            conn,
            "The Musical Hop",
            "San Francisco",
            UsState::California,
            &[Genre::Jazz],
        )
        .await?,
        park: base::insert_venue(
            conn,
            "Park Square Live Music & Coffee",
            "San Francisco",
            UsState::California,
            &[Genre::Folk],
        )
        .await?,
        guns: base::insert_artist(conn, "Guns N Petals", &[Genre::RockNRoll]).await?,
        sax: base::insert_artist(conn, "The Wild Sax Band", &[Genre::Jazz]).await?,
    })
}

#[tokio::test]
async fn list_ordered_by_start_time() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let conn = &db.sql_conn;
        let f = insert_fixtures(conn).await?;

        base::insert_show(conn, f.park, f.sax, base::date("2035-04-01 20:00:00")).await?;
        base::insert_show(conn, f.hop, f.guns, base::date("2019-05-21 21:30:00")).await?;
        base::insert_show(conn, f.park, f.guns, base::date("2035-04-01 20:00:00")).await?;

        let app = base::get_app(db.clone()).await;
        let req = test::TestRequest::get().uri("/shows").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let body = test::read_body(res).await;
        let shows: Vec<ShowItem> = base::try_from_slice(&body)?;
        assert_eq!(shows.len(), 3);

        assert_eq!(shows[0].venue_id, f.hop);
        assert_eq!(shows[0].venue_name, "The Musical Hop");
        assert_eq!(shows[0].artist_name, "Guns N Petals");
        assert!(shows[0].artist_image_link.is_some());
        assert_eq!(shows[0].start_time, base::date("2019-05-21 21:30:00"));

        // Same start time and venue, ordered by artist
        assert_eq!(shows[1].artist_id, f.guns.min(f.sax));
        assert_eq!(shows[2].artist_id, f.guns.max(f.sax));

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn create_show() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let f = insert_fixtures(&db.sql_conn).await?;
        let app = base::get_app(db.clone()).await;

        let req = test::TestRequest::post()
            .uri("/shows/create")
            .set_json(serde_json::json!({
                "artist_id": f.sax,
                "venue_id": f.park,
                "start_time": "2035-04-01 20:00",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 201);

        let body = test::read_body(res).await;
        let booked: Booked = base::try_from_slice(&body)?;
        assert_eq!(booked.message, "Show was successfully listed!");
        assert_eq!((booked.venue_id, booked.artist_id), (f.park, f.sax));
        assert_eq!(booked.start_time, base::date("2035-04-01 20:00:00"));

        let show = shows::Entity::find_by_id((f.park, f.sax))
            .one(&db.sql_conn)
            .await?
            .unwrap_or_else(|| panic!("Show should be inserted in database"));
        assert_eq!(show.start_time, base::date("2035-04-01 20:00:00"));

        let req = test::TestRequest::post()
            .uri("/shows/create")
            .set_json(serde_json::json!({
                "artist_id": f.sax,
                "venue_id": f.park,
                "start_time": "2035-05-01T20:00:00Z",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 409);
        let body = test::read_body(res).await;
        let err: base::ErrorResponse = serde_json::from_slice(&body)?;
        assert_eq!(err.r#type, 305);

        let count = shows::Entity::find().count(&db.sql_conn).await?;
        assert_eq!(count, 1);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn create_show_unknown_artist() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let f = insert_fixtures(&db.sql_conn).await?;
        let app = base::get_app(db.clone()).await;

        let unknown = f.guns.max(f.sax) + 100;
        let req = test::TestRequest::post()
            .uri("/shows/create")
            .set_json(serde_json::json!({
                "artist_id": unknown,
                "venue_id": f.hop,
                "start_time": "2035-04-01 20:00:00",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 404);
        let body = test::read_body(res).await;
        let err: base::ErrorResponse = serde_json::from_slice(&body)?;
        assert_eq!(err.r#type, 303);

        let req = test::TestRequest::post()
            .uri("/shows/create")
            .set_json(serde_json::json!({
                "artist_id": f.guns,
                "venue_id": f.hop.max(f.park) + 100,
                "start_time": "2035-04-01 20:00:00",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 404);
        let body = test::read_body(res).await;
        let err: base::ErrorResponse = serde_json::from_slice(&body)?;
        assert_eq!(err.r#type, 302);

        let count = shows::Entity::find().count(&db.sql_conn).await?;
        assert_eq!(count, 0);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn create_show_malformed_start_time() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let f = insert_fixtures(&db.sql_conn).await?;
        let app = base::get_app(db.clone()).await;

        let req = test::TestRequest::post()
            .uri("/shows/create")
            .set_json(serde_json::json!({
                "artist_id": f.guns,
                "venue_id": f.hop,
                "start_time": "next friday",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);

        let body = test::read_body(res).await;
        let err: base::ErrorResponse = serde_json::from_slice(&body)?;
        assert_eq!(err.r#type, 304);
        let errors = err.errors.unwrap_or_else(|| panic!("errors should be returned"));
        assert_eq!(errors["start_time"][0], "Not a valid datetime value.");
        let echoed = err.form.unwrap_or_else(|| panic!("form should be echoed"));
        assert_eq!(echoed["start_time"], "next friday");

        let count = shows::Entity::find().count(&db.sql_conn).await?;
        assert_eq!(count, 0);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn create_form_defaults_to_now() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db.clone()).await;

        let before = chrono::Utc::now().naive_utc();
        let req = test::TestRequest::get().uri("/shows/create").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let body = test::read_body(res).await;
        let form: serde_json::Value = base::try_from_slice(&body)?;
        let start_time = form["values"]["start_time"]
            .as_str()
            .unwrap_or_else(|| panic!("start time should be a string"));
        let start_time = NaiveDateTime::parse_from_str(start_time, "%Y-%m-%d %H:%M:%S")?;
        assert!((start_time - before).num_seconds().abs() <= 1);
        assert!(form["values"]["artist_id"].is_null());

        anyhow::Ok(())
    })
    .await
}
