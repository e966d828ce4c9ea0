use booking_lib::{Database, DbEnv, LibEnv};
use clap::Parser;
use migration::MigratorTrait as _;
use mkenv::prelude::*;

use self::{clear::ClearCommand, seed::SeedCommand, shows::ShowsCommand};

mod clear;
mod seed;
mod shows;

#[derive(clap::Parser)]
enum Command {
    /// Lists the sample venues, artists and shows.
    Seed(SeedCommand),
    /// Deletes every venue, artist and show.
    Clear(ClearCommand),
    /// Prints the table of every show.
    Shows(ShowsCommand),
}

mkenv::make_config! {
    struct Env {
        db_env: { DbEnv },
        lib_env: { LibEnv },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => return Err(err.into()),
        _ => (),
    }
    tracing_subscriber::fmt()
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("unable to init tracing_subscriber: {e}"))?;
    let env = Env::define();
    env.init();
    booking_lib::init_env(env.lib_env);

    let db = Database::from_db_url(env.db_env.db_url.get()).await?;
    migration::Migrator::up(&db.sql_conn, None).await?;

    let cmd = Command::parse();

    match cmd {
        Command::Seed(cmd) => seed::seed(db, cmd).await,
        Command::Clear(cmd) => clear::clear(db, cmd).await,
        Command::Shows(cmd) => shows::shows(db, cmd).await,
    }
}
