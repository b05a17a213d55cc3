//! A [DocumentStore] that keeps JSON documents in a SQLite table.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};
use serde_json::Value;

use crate::{
    Error,
    store::{Collection, Document, DocumentId, DocumentStore, Fields, SortOrder},
};

/// Stores documents as JSON text in the `document` table.
///
/// The connection is shared with the rest of the app and guarded by a mutex.
#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteDocumentStore {
    /// Create a store that uses `connection`.
    ///
    /// The caller should ensure the `document` table exists, see
    /// [create_document_table].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn list_all(&self, collection: Collection) -> Result<Vec<Document>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(
                "SELECT id, data FROM document WHERE collection = ?1 \
                ORDER BY created_at ASC, rowid ASC;",
            )?
            .query_map([collection.name()], map_row)?
            .map(|maybe_document| maybe_document.map_err(Error::from))
            .collect()
    }

    fn list_recent(
        &self,
        collection: Collection,
        order_by: &str,
        order: SortOrder,
        limit: usize,
    ) -> Result<Vec<Document>, Error> {
        let connection = self.lock()?;

        let query = match order {
            SortOrder::Ascending => {
                "SELECT id, data FROM document WHERE collection = ?1 \
                ORDER BY json_extract(data, '$.' || ?2) ASC, rowid ASC LIMIT ?3;"
            }
            SortOrder::Descending => {
                "SELECT id, data FROM document WHERE collection = ?1 \
                ORDER BY json_extract(data, '$.' || ?2) DESC, rowid DESC LIMIT ?3;"
            }
        };

        connection
            .prepare(query)?
            .query_map((collection.name(), order_by, limit as i64), map_row)?
            .map(|maybe_document| maybe_document.map_err(Error::from))
            .collect()
    }

    fn get(&self, collection: Collection, id: &DocumentId) -> Result<Document, Error> {
        let connection = self.lock()?;

        connection
            .prepare("SELECT id, data FROM document WHERE collection = ?1 AND id = ?2;")?
            .query_row((collection.name(), id.as_ref()), map_row)
            .map_err(Error::from)
    }

    fn create(&self, collection: Collection, fields: Fields) -> Result<DocumentId, Error> {
        let data = Value::Object(fields).to_string();
        let connection = self.lock()?;

        let id: String = connection.query_row(
            "INSERT INTO document (collection, id, data) \
            VALUES (?1, lower(hex(randomblob(10))), ?2) RETURNING id;",
            (collection.name(), data),
            |row| row.get(0),
        )?;

        tracing::debug!("created document {id} in {collection}");

        Ok(DocumentId(id))
    }

    fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Fields,
    ) -> Result<(), Error> {
        let patch = Value::Object(fields).to_string();
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "UPDATE document SET data = json_patch(data, ?3) WHERE collection = ?1 AND id = ?2;",
            (collection.name(), id.as_ref(), patch),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn delete(&self, collection: Collection, id: &DocumentId) -> Result<(), Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "DELETE FROM document WHERE collection = ?1 AND id = ?2;",
            (collection.name(), id.as_ref()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

/// Initialize the document table and indexes.
pub fn create_document_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS document (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            data TEXT NOT NULL CHECK (json_valid(data)),
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
            PRIMARY KEY (collection, id)
        );

        CREATE INDEX IF NOT EXISTS idx_document_collection ON document(collection);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Document, rusqlite::Error> {
    let id: String = row.get(0)?;
    let data: String = row.get(1)?;

    let fields = match serde_json::from_str(&data) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            tracing::warn!("document {id} is not a JSON object: {other}");
            Fields::new()
        }
        Err(error) => {
            tracing::warn!("document {id} is not valid JSON: {error}");
            Fields::new()
        }
    };

    Ok(Document {
        id: DocumentId(id),
        fields,
    })
}
