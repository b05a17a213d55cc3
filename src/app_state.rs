//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    pagination::PaginationConfig,
    store::{DocumentStore, SqliteDocumentStore},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store holding products, customers and transactions.
    pub store: Arc<dyn DocumentStore>,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the document table.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Jakarta".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let store = SqliteDocumentStore::new(Arc::new(Mutex::new(db_connection)));

        Ok(Self::with_store(
            Arc::new(store),
            local_timezone,
            pagination_config,
        ))
    }

    /// Create a new [AppState] around an existing document store.
    pub fn with_store(
        store: Arc<dyn DocumentStore>,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Self {
        Self {
            store,
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        }
    }
}
