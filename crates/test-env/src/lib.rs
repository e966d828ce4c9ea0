use std::{env, panic};

use anyhow::Context as _;
use booking_lib::Database;
use futures::FutureExt as _;
use migration::MigratorTrait as _;
use sea_orm::DbConn;
use tracing_subscriber::fmt::TestWriter;

fn is_db_drop_forced() -> bool {
    env::args_os().any(|arg| arg == "--force-drop-db")
}

pub trait IntoResult {
    type Out;

    fn into_result(self) -> anyhow::Result<Self::Out>;
}

impl IntoResult for () {
    type Out = ();

    fn into_result(self) -> anyhow::Result<Self::Out> {
        Ok(())
    }
}

impl<T, E> IntoResult for Result<T, E>
where
    anyhow::Error: From<E>,
{
    type Out = T;

    fn into_result(self) -> anyhow::Result<Self::Out> {
        self.map_err(From::from)
    }
}

pub fn init_env() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => return Err(err).context("cannot retrieve .env files"),
        _ => (),
    }

    let _ = tracing_subscriber::fmt()
        .with_writer(TestWriter::new())
        .try_init();

    Ok(())
}

/// A throwaway database, created for a single test.
struct TestDb {
    name: String,
    #[cfg(feature = "postgres")]
    master_db: DbConn,
}

#[cfg(not(feature = "postgres"))]
impl TestDb {
    fn path(&self) -> std::path::PathBuf {
        env::temp_dir().join(format!("{}.sqlite", self.name))
    }

    async fn create(name: String) -> anyhow::Result<(Self, DbConn)> {
        let test_db = Self { name };
        let url = format!("sqlite://{}?mode=rwc", test_db.path().display());
        let db = sea_orm::Database::connect(url).await?;
        tracing::info!("Created database {}", test_db.name);
        Ok((test_db, db))
    }

    async fn drop_db(self) -> anyhow::Result<()> {
        let path = self.path();
        std::fs::remove_file(&path)
            .with_context(|| format!("couldn't remove database file {}", path.display()))
    }
}

#[cfg(feature = "postgres")]
impl TestDb {
    async fn create(name: String) -> anyhow::Result<(Self, DbConn)> {
        use booking_lib::DbEnv;
        use mkenv::prelude::*;
        use sea_orm::{ConnectionTrait as _, sqlx};

        let env = DbEnv::define();
        let master_db = sea_orm::Database::connect(env.db_url.get()).await?;

        master_db
            .execute_unprepared(&format!("create database {name}"))
            .await?;
        tracing::info!("Created database {name}");

        let connect_options = master_db.get_postgres_connection_pool().connect_options();
        let options = (*connect_options).clone().database(&name);
        let db = sqlx::postgres::PgPool::connect_with(options).await?;

        Ok((Self { name, master_db }, DbConn::from(db)))
    }

    async fn drop_db(self) -> anyhow::Result<()> {
        use sea_orm::ConnectionTrait as _;

        self.master_db
            .execute_unprepared(&format!("drop database {}", self.name))
            .await?;
        Ok(())
    }
}

pub async fn wrap<F, R>(test: F) -> anyhow::Result<<R as IntoResult>::Out>
where
    F: AsyncFnOnce(Database) -> R,
    R: IntoResult,
{
    init_env()?;

    // Postgres folds unquoted names to lowercase
    let db_name = format!(
        "_test_db_{}",
        booking_lib::gen_random_str(10).to_lowercase()
    );

    let (test_db, db) = TestDb::create(db_name).await?;
    migration::Migrator::up(&db, None).await?;
    let db = Database::from(db);

    let outcome = panic::AssertUnwindSafe(test(db.clone()))
        .catch_unwind()
        .await
        .map(IntoResult::into_result);
    db.sql_conn.close().await?;

    if matches!(outcome, Ok(Ok(_))) || is_db_drop_forced() {
        let name = test_db.name.clone();
        test_db.drop_db().await?;
        tracing::info!("Dropped database {name}");
    } else {
        tracing::info!(
            "Test failed, keeping database {}. Run with `--force-drop-db` to always drop it.",
            test_db.name
        );
    }

    match outcome {
        Ok(out) => out,
        Err(payload) => panic::resume_unwind(payload),
    }
}
