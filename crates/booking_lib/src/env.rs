use once_cell::sync::OnceCell;

#[cfg(debug_assertions)]
mkenv::make_config! {
    /// The environment used to set up a connection to the SQL database.
    pub struct DbEnv {
        /// The database URL.
        pub db_url: {
            var_name: "DATABASE_URL",
            layers: [
                or_default_val(|| "sqlite://booking.sqlite?mode=rwc".to_owned()),
            ],
            description: "The URL to the SQL database",
            default_val_fmt: "sqlite://booking.sqlite?mode=rwc",
        }
    }
}
#[cfg(not(debug_assertions))]
mkenv::make_config! {
    /// The environment used to set up a connection to the SQL database.
    pub struct DbEnv {
        /// The path to the file containing the database URL.
        pub db_url: {
            var_name: "DATABASE_URL",
            layers: [
                file_read(),
            ],
            description: "The path to the file containing the URL to the SQL database",
        }
    }
}

mkenv::make_config! {
    /// The environment used by this crate.
    pub struct LibEnv {
        /// The amount of venues and artists shown as the latest listings on the home page.
        pub latest_listings: {
            var_name: "BOOKING_LATEST_LISTINGS",
            layers: [
                parsed_from_str<u64>(),
                or_default_val(|| 10),
            ],
            description: "The amount of latest listed venues and artists shown on the home page",
            default_val_fmt: "10",
        },
    }
}

static ENV: OnceCell<LibEnv> = OnceCell::new();

/// Initializes the provided library environment as global.
///
/// If this function has already been called, the provided environment will be ignored.
pub fn init_env(env: LibEnv) {
    let _ = ENV.set(env);
}

/// Returns a static reference to the global library environment.
///
/// **Caution**: To use this function, the [`init_env()`] function must have been called at the start
/// of the program.
pub fn env() -> &'static LibEnv {
    ENV.get().unwrap()
}
