//! Loads the database connection parameters from the environment.

use std::env;

use crate::Error;

/// The environment variable holding the database URI.
pub const DATABASE_URI_KEY: &str = "MONGODB_URI";
/// The environment variable holding the database name.
pub const DATABASE_NAME_KEY: &str = "MONGODB_DB_NAME";

/// The parameters needed to connect to the application database.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Where the database lives, e.g. "mongodb://localhost:27017" or "sqlite::memory:".
    pub uri: String,
    /// The name of the database that holds the transactions collection.
    pub name: String,
}

impl DatabaseConfig {
    /// Create a config from explicit values.
    pub fn new(uri: &str, name: &str) -> Self {
        Self {
            uri: uri.to_owned(),
            name: name.to_owned(),
        }
    }

    /// Read [DATABASE_URI_KEY] and [DATABASE_NAME_KEY] from the process environment.
    ///
    /// # Errors
    /// Returns [Error::MissingEnvironmentVariable] if either variable is unset or blank.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config using `lookup` to resolve variable names to values.
    ///
    /// # Errors
    /// Returns [Error::MissingEnvironmentVariable] if `lookup` returns `None`
    /// or a blank string for either variable.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let require = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .ok_or(Error::MissingEnvironmentVariable(key))
        };

        Ok(Self {
            uri: require(DATABASE_URI_KEY)?,
            name: require(DATABASE_NAME_KEY)?,
        })
    }
}
