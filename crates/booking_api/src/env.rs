use booking_lib::{DbEnv, LibEnv};
use mkenv::{error::ConfigInitError, prelude::*};
use once_cell::sync::OnceCell;

#[cfg(debug_assertions)]
mkenv::make_config! {
    pub struct Hostname {}
}

#[cfg(not(debug_assertions))]
mkenv::make_config! {
    pub struct Hostname {
        pub host: {
            var_name: "BOOKING_API_HOST",
            description: "The hostname of the website using the API (e.g. https://fyyur.example.com)",
        }
    }
}

mkenv::make_config! {
    pub struct ApiEnv {
        pub db_env: { DbEnv },

        pub port: {
            var_name: "BOOKING_API_PORT",
            layers: [
                parsed_from_str<u16>(),
                or_default_val(|| 3000),
            ],
            description: "The port used to expose the API",
            default_val_fmt: "3000",
        },

        pub host: { Hostname },

        pub json_limit: {
            var_name: "BOOKING_API_JSON_LIMIT",
            layers: [
                parsed_from_str<usize>(),
                or_default_val(|| 16 * 1024),
            ],
            description: "The maximum size of a JSON body submitted to the API (in bytes)",
            default_val_fmt: "16 KiB",
        },
    }
}

static ENV: OnceCell<ApiEnv> = OnceCell::new();

pub fn env() -> &'static ApiEnv {
    ENV.get().unwrap()
}

pub fn init_env() -> anyhow::Result<()> {
    fn map_err(err: ConfigInitError<'_>) -> anyhow::Error {
        anyhow::anyhow!("{err}")
    }

    let env = ApiEnv::define();
    let lib_env = LibEnv::define();
    env.try_init().map_err(map_err)?;
    lib_env.try_init().map_err(map_err)?;
    booking_lib::init_env(lib_env);
    let _ = ENV.set(env);

    Ok(())
}
