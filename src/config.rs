//! Application configuration management.
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file) and deserialized into a typed struct with `envy`.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (optional): PostgreSQL connection string. When absent the
///   service keeps transactions in memory.
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A missing `.env` file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed into
    /// its expected type (e.g. a non-numeric `SERVER_PORT`).
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }

    /// Build a configuration from an explicit list of variables.
    ///
    /// Field names map the same way as in [`Config::from_env`]:
    /// `database_url` <- `DATABASE_URL`.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
    }
}
