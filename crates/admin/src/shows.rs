use booking_lib::{Database, show, time};

#[derive(clap::Args)]
pub struct ShowsCommand {
    /// Only prints the shows that haven't started yet.
    #[arg(long)]
    upcoming: bool,
}

pub async fn shows(db: Database, ShowsCommand { upcoming }: ShowsCommand) -> anyhow::Result<()> {
    let now = time::now();
    let shows = show::list(&db.sql_conn)
        .await?
        .into_iter()
        .filter(|show| {
            !upcoming || time::ShowTiming::of(show.start_time, now) == time::ShowTiming::Upcoming
        });

    let mut table =
        prettytable::Table::init(vec![prettytable::row!["Start time", "Venue", "Artist"]]);

    for show in shows {
        table.add_row(prettytable::row![
            time::format_form_date(show.start_time),
            format!("{} (#{})", show.venue_name, show.venue_id),
            format!("{} (#{})", show.artist_name, show.artist_id),
        ]);
    }

    println!("{table}");

    Ok(())
}
