use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use serde_json::Value;

use crate::{
    Error,
    store::{
        Collection, Document, DocumentId, DocumentStore, Fields, SortOrder, SqliteDocumentStore,
        create_document_table,
    },
};

/// An empty document store backed by an in-memory database.
pub(crate) fn get_test_store() -> Arc<dyn DocumentStore> {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    create_document_table(&connection).expect("Could not create document table");

    Arc::new(SqliteDocumentStore::new(Arc::new(Mutex::new(connection))))
}

/// Convert a `json!` object into document fields.
#[track_caller]
fn fields(value: Value) -> Fields {
    match value {
        Value::Object(fields) => fields,
        other => panic!("want a JSON object, got {other}"),
    }
}

/// Add a document to `collection` and return its ID.
#[track_caller]
pub(crate) fn insert(store: &dyn DocumentStore, collection: Collection, value: Value) -> DocumentId {
    store
        .create(collection, fields(value))
        .expect("Could not create test document")
}

/// A store where every operation fails, as if the database were unreachable.
#[derive(Debug)]
pub(crate) struct FailingStore;

impl DocumentStore for FailingStore {
    fn list_all(&self, _: Collection) -> Result<Vec<Document>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn list_recent(
        &self,
        _: Collection,
        _: &str,
        _: SortOrder,
        _: usize,
    ) -> Result<Vec<Document>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get(&self, _: Collection, _: &DocumentId) -> Result<Document, Error> {
        Err(Error::DatabaseLockError)
    }

    fn create(&self, _: Collection, _: Fields) -> Result<DocumentId, Error> {
        Err(Error::DatabaseLockError)
    }

    fn update(&self, _: Collection, _: &DocumentId, _: Fields) -> Result<(), Error> {
        Err(Error::DatabaseLockError)
    }

    fn delete(&self, _: Collection, _: &DocumentId) -> Result<(), Error> {
        Err(Error::DatabaseLockError)
    }
}
