use actix_web::test;
use chrono::NaiveDateTime;
use entity::{
    artist_genres, artists,
    types::{Genre, UsState},
};
use sea_orm::{ColumnTrait as _, EntityTrait as _, PaginatorTrait as _, QueryFilter as _};
use serde::Deserialize;

mod base;

#[derive(Deserialize, Debug, PartialEq)]
struct Listed {
    id: i32,
    name: String,
}

#[derive(Deserialize, Debug, PartialEq)]
struct Artist {
    id: i32,
    name: String,
    num_upcoming_shows: u64,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    search_term: String,
    count: usize,
    data: Vec<Artist>,
}

#[derive(Deserialize, Debug)]
struct ArtistShow {
    venue_id: i32,
    venue_name: String,
    start_time: NaiveDateTime,
}

#[derive(Deserialize, Debug)]
struct ArtistDetail {
    id: i32,
    name: String,
    genres: Vec<String>,
    seeking_venue: bool,
    past_shows: Vec<ArtistShow>,
    upcoming_shows: Vec<ArtistShow>,
    past_shows_count: usize,
    upcoming_shows_count: usize,
}

#[derive(Deserialize, Debug)]
struct Confirmation {
    id: i32,
    message: String,
}

fn wild_sax_band_form() -> serde_json::Value {
    serde_json::json!({
        "name": "The Wild Sax Band",
        "city": "San Francisco",
        "state": "CA",
        "phone": "432-325-5432",
        "genres": ["Jazz", "Classical"],
        "image_link": "https://images.unsplash.com/photo-1558369981-f9ca78462e61",
    })
}

#[tokio::test]
async fn list_ordered_by_name() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let conn = &db.sql_conn;
        let sax = base::insert_artist(conn, "The Wild Sax Band", &[Genre::Jazz]).await?;
        let guns = base::insert_artist(conn, "Guns N Petals", &[Genre::RockNRoll]).await?;
        let matt = base::insert_artist(conn, "Matt Quevedo", &[Genre::Jazz]).await?;

        let app = base::get_app(db.clone()).await;
        let req = test::TestRequest::get().uri("/artists").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let body = test::read_body(res).await;
        let artists: Vec<Listed> = base::try_from_slice(&body)?;
        assert_eq!(
            artists,
            [
                Listed {
                    id: guns,
                    name: "Guns N Petals".to_owned()
                },
                Listed {
                    id: matt,
                    name: "Matt Quevedo".to_owned()
                },
                Listed {
                    id: sax,
                    name: "The Wild Sax Band".to_owned()
                },
            ]
        );

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn search_band() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let conn = &db.sql_conn;
        base::insert_artist(conn, "Guns N Petals", &[Genre::RockNRoll]).await?;
        base::insert_artist(conn, "Matt Quevedo", &[Genre::Jazz]).await?;
        let sax = base::insert_artist(conn, "The Wild Sax Band", &[Genre::Jazz]).await?;
        let park = base::insert_venue(
            conn,
            "Park Square Live Music & Coffee",
            "San Francisco",
            UsState::California,
            &[Genre::Folk],
        )
        .await?;
        base::insert_show(conn, park, sax, base::days_from_now(10)).await?;

        let app = base::get_app(db.clone()).await;
        let req = test::TestRequest::post()
            .uri("/artists/search")
            .set_form([("search_term", "band")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let body = test::read_body(res).await;
        let found: SearchResponse = base::try_from_slice(&body)?;
        assert_eq!(found.search_term, "band");
        assert_eq!(found.count, 1);
        assert_eq!(
            found.data,
            [Artist {
                id: sax,
                name: "The Wild Sax Band".to_owned(),
                num_upcoming_shows: 1,
            }]
        );

        let req = test::TestRequest::post()
            .uri("/artists/search")
            .set_form([("search_term", "N")])
            .to_request();
        let res = test::call_service(&app, req).await;
        let body = test::read_body(res).await;
        let found: SearchResponse = base::try_from_slice(&body)?;
        assert_eq!(
            found.data.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            ["Guns N Petals", "The Wild Sax Band"]
        );

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn detail_with_upcoming_shows() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let conn = &db.sql_conn;
        let sax = base::insert_artist(
            conn,
            "The Wild Sax Band",
            &[Genre::Jazz, Genre::Classical],
        )
        .await?;
        let park = base::insert_venue(
            conn,
            "Park Square Live Music & Coffee",
            "San Francisco",
            UsState::California,
            &[Genre::Folk],
        )
        .await?;
        let hop = base::insert_venue(
            conn,
            "The Musical Hop",
            "San Francisco",
            UsState::California,
            &[Genre::Jazz],
        )
        .await?;
        let pianos = base::insert_venue(
            conn,
            "The Dueling Pianos Bar",
            "New York",
            UsState::NewYork,
            &[Genre::Classical],
        )
        .await?;

        base::insert_show(conn, pianos, sax, base::days_from_now(20)).await?;
        base::insert_show(conn, park, sax, base::days_from_now(5)).await?;
        base::insert_show(conn, hop, sax, base::date("2019-04-01 20:00:00")).await?;

        let app = base::get_app(db.clone()).await;
        let req = test::TestRequest::get()
            .uri(&format!("/artists/{sax}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let body = test::read_body(res).await;
        let artist: ArtistDetail = base::try_from_slice(&body)?;
        assert_eq!(artist.id, sax);
        assert_eq!(artist.name, "The Wild Sax Band");
        assert_eq!(artist.genres, ["Jazz", "Classical"]);
        assert!(!artist.seeking_venue);
        assert_eq!(artist.past_shows_count, 1);
        assert_eq!(artist.past_shows[0].venue_id, hop);
        assert_eq!(artist.upcoming_shows_count, 2);
        assert_eq!(
            artist
                .upcoming_shows
                .iter()
                .map(|s| s.venue_name.as_str())
                .collect::<Vec<_>>(),
            ["Park Square Live Music & Coffee", "The Dueling Pianos Bar"]
        );
        let upcoming = &artist.upcoming_shows;
        assert!(upcoming[0].start_time < upcoming[1].start_time);

        let req = test::TestRequest::get().uri("/artists/404").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 404);
        let body = test::read_body(res).await;
        let err: base::ErrorResponse = serde_json::from_slice(&body)?;
        assert_eq!(err.r#type, 303);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn create_artist() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db.clone()).await;

        let req = test::TestRequest::post()
            .uri("/artists/create")
            .set_json(wild_sax_band_form())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 201);

        let body = test::read_body(res).await;
        let created: Confirmation = base::try_from_slice(&body)?;
        assert_eq!(
            created.message,
            "Artist The Wild Sax Band was successfully listed!"
        );

        let artist = artists::Entity::find_by_id(created.id)
            .one(&db.sql_conn)
            .await?
            .unwrap_or_else(|| panic!("Artist should be inserted in database"));
        assert_eq!(artist.phone.as_deref(), Some("432-325-5432"));
        assert_eq!(artist.facebook_link, None);
        assert_eq!(artist.seeking_description, None);

        let genres = artist_genres::Entity::find()
            .filter(artist_genres::Column::ArtistId.eq(created.id))
            .count(&db.sql_conn)
            .await?;
        assert_eq!(genres, 2);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn create_artist_without_genres() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db.clone()).await;

        let mut form = wild_sax_band_form();
        form["genres"] = serde_json::json!([]);
        form["website"] = "not a url".into();

        let req = test::TestRequest::post()
            .uri("/artists/create")
            .set_json(&form)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);

        let body = test::read_body(res).await;
        let err: base::ErrorResponse = serde_json::from_slice(&body)?;
        assert_eq!(err.r#type, 304);
        let errors = err.errors.unwrap_or_else(|| panic!("errors should be returned"));
        assert_eq!(errors["genres"][0], "This field is required.");
        assert_eq!(errors["website"][0], "Invalid URL.");

        let count = artists::Entity::find().count(&db.sql_conn).await?;
        assert_eq!(count, 0);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn edit_and_delete_artist() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let conn = &db.sql_conn;
        let matt = base::insert_artist(conn, "Matt Quevedo", &[Genre::Jazz]).await?;

        let app = base::get_app(db.clone()).await;

        let req = test::TestRequest::get()
            .uri(&format!("/artists/{matt}/edit"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        let body = test::read_body(res).await;
        let form: serde_json::Value = base::try_from_slice(&body)?;
        assert_eq!(form["values"]["name"], "Matt Quevedo");
        assert!(
            form["fields"]
                .as_array()
                .is_some_and(|fields| fields.iter().all(|f| f["name"] != "address"))
        );

        let mut edited = form["values"].clone();
        edited["seeking_venue"] = true.into();
        edited["seeking_description"] = "Looking for shows in the Bay Area.".into();

        let req = test::TestRequest::post()
            .uri(&format!("/artists/{matt}/edit"))
            .set_json(&edited)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let artist = artists::Entity::find_by_id(matt)
            .one(conn)
            .await?
            .unwrap_or_else(|| panic!("Artist should exist in database"));
        assert!(artist.seeking_venue);
        assert_eq!(
            artist.seeking_description.as_deref(),
            Some("Looking for shows in the Bay Area.")
        );

        let req = test::TestRequest::delete()
            .uri(&format!("/artists/{matt}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        assert!(artists::Entity::find_by_id(matt).one(conn).await?.is_none());

        anyhow::Ok(())
    })
    .await
}
