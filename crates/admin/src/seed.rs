use booking_lib::{
    Database, artist,
    forms::{ArtistForm, ShowForm, VenueForm},
    show, venue,
};

#[derive(clap::Args)]
pub struct SeedCommand {
    /// Doesn't book the sample shows.
    #[arg(long)]
    without_shows: bool,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_owned()).collect()
}

fn some(value: &str) -> Option<String> {
    Some(value.to_owned())
}

fn venues() -> [VenueForm; 3] {
    [
        VenueForm {
            name: "The Musical Hop".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            address: "1015 Folsom Street".to_owned(),
            phone: some("123-123-1234"),
            genres: strings(&["Jazz", "Reggae", "Swing", "Classical", "Folk"]),
            image_link: some(
                "https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=400&q=60",
            ),
            facebook_link: some("https://www.facebook.com/TheMusicalHop"),
            website: some("https://www.themusicalhop.com"),
            seeking_talent: true,
            seeking_description: some(
                "We are on the lookout for a local artist to play every two weeks. Please call us.",
            ),
        },
        VenueForm {
            name: "The Dueling Pianos Bar".to_owned(),
            city: "New York".to_owned(),
            state: "NY".to_owned(),
            address: "335 Delancey Street".to_owned(),
            phone: some("914-003-1132"),
            genres: strings(&["Classical", "R&B", "Hip-Hop"]),
            image_link: some(
                "https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=750&q=80",
            ),
            facebook_link: some("https://www.facebook.com/theduelingpianos"),
            website: some("https://www.theduelingpianos.com"),
            seeking_talent: false,
            seeking_description: None,
        },
        VenueForm {
            name: "Park Square Live Music & Coffee".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            address: "34 Whiskey Moore Ave".to_owned(),
            phone: some("415-000-1234"),
            genres: strings(&["Rock n Roll", "Jazz", "Classical", "Folk"]),
            image_link: some(
                "https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=747&q=80",
            ),
            facebook_link: some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee"),
            website: some("https://www.parksquarelivemusicandcoffee.com"),
            seeking_talent: false,
            seeking_description: None,
        },
    ]
}

fn artists() -> [ArtistForm; 3] {
    [
        ArtistForm {
            name: "Guns N Petals".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            phone: some("326-123-5000"),
            genres: strings(&["Rock n Roll"]),
            image_link: some(
                "https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=300&q=80",
            ),
            facebook_link: some("https://www.facebook.com/GunsNPetals"),
            website: some("https://www.gunsnpetalsband.com"),
            seeking_venue: true,
            seeking_description: some(
                "Looking for shows to perform at in the San Francisco Bay Area!",
            ),
        },
        ArtistForm {
            name: "Matt Quevedo".to_owned(),
            city: "New York".to_owned(),
            state: "NY".to_owned(),
            phone: some("300-400-5000"),
            genres: strings(&["Jazz"]),
            image_link: some(
                "https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=334&q=80",
            ),
            facebook_link: some("https://www.facebook.com/mattquevedo923251523"),
            website: None,
            seeking_venue: false,
            seeking_description: None,
        },
        ArtistForm {
            name: "The Wild Sax Band".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            phone: some("432-325-5432"),
            genres: strings(&["Jazz", "Classical"]),
            image_link: some(
                "https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=794&q=80",
            ),
            facebook_link: None,
            website: None,
            seeking_venue: false,
            seeking_description: None,
        },
    ]
}

/// The sample shows, as (venue index, artist index, start time).
const SHOWS: [(usize, usize, &str); 3] = [
    (0, 0, "2019-05-21T21:30:00.000Z"),
    (2, 1, "2019-06-15T23:00:00.000Z"),
    (2, 2, "2035-04-01T20:00:00.000Z"),
];

pub async fn seed(db: Database, SeedCommand { without_shows }: SeedCommand) -> anyhow::Result<()> {
    let conn = &db.sql_conn;

    let mut venue_ids = Vec::with_capacity(3);
    for form in venues() {
        let listed = venue::create(conn, &form).await?;
        tracing::info!("Listed venue {} (#{})", listed.name, listed.id);
        venue_ids.push(listed.id);
    }

    let mut artist_ids = Vec::with_capacity(3);
    for form in artists() {
        let listed = artist::create(conn, &form).await?;
        tracing::info!("Listed artist {} (#{})", listed.name, listed.id);
        artist_ids.push(listed.id);
    }

    if without_shows {
        return Ok(());
    }

    for (venue, artist, start_time) in SHOWS {
        let form = ShowForm {
            venue_id: Some(venue_ids[venue]),
            artist_id: Some(artist_ids[artist]),
            start_time: Some(start_time.to_owned()),
        };
        show::create(conn, &form).await?;
    }

    tracing::info!("Booked {} shows", SHOWS.len());

    Ok(())
}
