//! Owns the connection to the application database.
//!
//! A [ConnectionManager] is created at startup, connected once, and then shared
//! with every request handler through the app state. Handlers ask it for the
//! [DatabaseHandle] which fails with [Error::Uninitialized] until
//! [ConnectionManager::connect] has succeeded.

use std::sync::{Arc, Mutex};

use mongodb::{Client, bson::doc};
use rusqlite::Connection;
use tokio::sync::OnceCell;

use crate::{Error, config::DatabaseConfig, transaction::sqlite::create_transaction_table};

/// The database engines that can back the API.
#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    /// A MongoDB deployment, selected by the `mongodb://` and `mongodb+srv://` schemes.
    Mongo,
    /// An SQLite database. `None` means an in-memory database.
    Sqlite(Option<String>),
}

impl Backend {
    /// Pick the backend from the scheme of `uri`.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfiguration] if the scheme is not recognised.
    pub fn from_uri(uri: &str) -> Result<Self, Error> {
        if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") {
            return Ok(Backend::Mongo);
        }

        if uri == "sqlite::memory:" {
            return Ok(Backend::Sqlite(None));
        }

        let path = uri
            .strip_prefix("sqlite://")
            .or_else(|| uri.strip_prefix("sqlite:"))
            .filter(|path| !path.is_empty());

        match path {
            Some(path) => Ok(Backend::Sqlite(Some(path.to_owned()))),
            None => Err(Error::InvalidConfiguration(format!(
                "unsupported database URI \"{uri}\", expected a mongodb:// or sqlite: URI"
            ))),
        }
    }
}

/// An established connection to the application database.
#[derive(Debug, Clone)]
pub enum DatabaseHandle {
    /// A handle to a MongoDB database.
    Mongo(mongodb::Database),
    /// A shared SQLite connection.
    Sqlite(Arc<Mutex<Connection>>),
}

impl DatabaseHandle {
    /// Open a connection described by `config` and prepare it for use.
    ///
    /// For MongoDB the server is pinged so that an unreachable deployment is
    /// reported here rather than on the first request. For SQLite the
    /// transaction table is created if it does not exist.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, Error> {
        match Backend::from_uri(&config.uri)? {
            Backend::Mongo => {
                let client = Client::with_uri_str(&config.uri).await?;
                let database = client.database(&config.name);
                database.run_command(doc! { "ping": 1 }).await?;

                Ok(DatabaseHandle::Mongo(database))
            }
            Backend::Sqlite(path) => {
                let connection = match path {
                    Some(path) => Connection::open(path)?,
                    None => Connection::open_in_memory()?,
                };
                create_transaction_table(&connection)?;

                Ok(DatabaseHandle::Sqlite(Arc::new(Mutex::new(connection))))
            }
        }
    }
}

/// Connects to the database once and hands out the resulting handle.
#[derive(Debug)]
pub struct ConnectionManager {
    config: DatabaseConfig,
    handle: OnceCell<DatabaseHandle>,
}

impl ConnectionManager {
    /// Create a manager that has not connected yet.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            handle: OnceCell::new(),
        }
    }

    /// Establish the connection if it has not been established already.
    ///
    /// Calling this again after it has succeeded returns the existing handle
    /// without reconnecting. There is no retry: the caller decides what to
    /// do with the error, usually exiting the process.
    ///
    /// # Errors
    /// Returns an error if the URI is not supported or the database cannot be reached.
    pub async fn connect(&self) -> Result<&DatabaseHandle, Error> {
        let result = self
            .handle
            .get_or_try_init(|| DatabaseHandle::open(&self.config))
            .await;

        match &result {
            Ok(_) => tracing::info!("Connected to database: {}", self.config.name),
            Err(error) => tracing::error!("Database connection failed: {error}"),
        }

        result
    }

    /// Get the handle established by [ConnectionManager::connect].
    ///
    /// # Errors
    /// Returns [Error::Uninitialized] if the manager has not connected yet.
    pub fn handle(&self) -> Result<&DatabaseHandle, Error> {
        self.handle.get().ok_or(Error::Uninitialized)
    }

    /// Whether [ConnectionManager::connect] has succeeded.
    pub fn is_ready(&self) -> bool {
        self.handle.initialized()
    }
}

#[cfg(test)]
mod backend_tests {
    use crate::{Error, db::Backend};

    #[test]
    fn mongodb_schemes_select_mongo() {
        assert_eq!(
            Backend::from_uri("mongodb://localhost:27017").unwrap(),
            Backend::Mongo
        );
        assert_eq!(
            Backend::from_uri("mongodb+srv://cluster.example.com").unwrap(),
            Backend::Mongo
        );
    }

    #[test]
    fn sqlite_memory_uri_selects_in_memory_database() {
        assert_eq!(
            Backend::from_uri("sqlite::memory:").unwrap(),
            Backend::Sqlite(None)
        );
    }

    #[test]
    fn sqlite_file_uris_keep_the_path() {
        assert_eq!(
            Backend::from_uri("sqlite://data/app.db").unwrap(),
            Backend::Sqlite(Some("data/app.db".to_owned()))
        );
        assert_eq!(
            Backend::from_uri("sqlite:app.db").unwrap(),
            Backend::Sqlite(Some("app.db".to_owned()))
        );
    }

    #[test]
    fn unknown_scheme_is_invalid_configuration() {
        assert!(matches!(
            Backend::from_uri("postgres://localhost/app"),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Backend::from_uri("sqlite:"),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
