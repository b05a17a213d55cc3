//! The document store that backs every page.
//!
//! Documents are loosely shaped JSON objects grouped into collections. Typed
//! views of those documents are decoded with [Document::decode], which never
//! fails: missing or mistyped fields fall back to their defaults.

mod fields;
mod sqlite;

use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::Error;

pub use fields::{
    lenient, lenient_amount, lenient_count, lenient_string, lenient_string_list,
    lenient_timestamp, split_list, timestamp,
};
pub use sqlite::{SqliteDocumentStore, create_document_table};

/// The fields of a document, keyed by field name.
pub type Fields = Map<String, Value>;

/// The collections kept in the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Items for sale in the catalog.
    Products,
    /// Shop customers. Stored under `users` for compatibility with exported data.
    Customers,
    /// Orders placed by customers.
    Transactions,
}

impl Collection {
    /// The name the collection is stored under.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Customers => "users",
            Collection::Transactions => "transactions",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The store-assigned identifier of a document, unique within its collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The direction for ordering documents in [DocumentStore::list_recent].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest values first.
    #[allow(dead_code)]
    Ascending,
    /// Largest values first.
    Descending,
}

/// A document read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

/// A typed view of a document.
pub trait Record: DeserializeOwned + Default {
    /// Pairs of `(alias, field)`. When a document has `alias` but not `field`,
    /// the value under `alias` is read as `field`.
    const KEY_ALIASES: &'static [(&'static str, &'static str)] = &[];
}

impl Document {
    /// Decode the document's fields as `T`.
    ///
    /// Alias keys are folded into their canonical names first. If a document
    /// cannot be decoded at all it is logged and `T::default()` is returned.
    pub fn decode<T: Record>(&self) -> T {
        let mut fields = self.fields.clone();
        normalize_keys(&mut fields, T::KEY_ALIASES);

        serde_json::from_value(Value::Object(fields))
            .inspect_err(|error| {
                tracing::warn!("could not decode document {}: {error}", self.id);
            })
            .unwrap_or_default()
    }
}

/// Fold each alias key into its canonical key.
///
/// When both keys hold objects, the alias fills in the nested fields the
/// canonical object lacks. Otherwise the canonical value wins.
fn normalize_keys(fields: &mut Fields, aliases: &[(&str, &str)]) {
    for (alias, canonical) in aliases {
        let Some(value) = fields.remove(*alias) else {
            continue;
        };

        match (fields.get_mut(*canonical), value) {
            (None, value) => {
                fields.insert((*canonical).to_owned(), value);
            }
            (Some(Value::Object(existing)), Value::Object(aliased)) => {
                for (key, nested) in aliased {
                    existing.entry(key).or_insert(nested);
                }
            }
            (Some(_), _) => {}
        }
    }
}

/// Serialize `value` into the fields of a document.
///
/// # Errors
///
/// Returns an [Error::JSONSerializationError] if `value` does not serialize
/// to a JSON object.
pub fn encode<T: Serialize>(value: &T) -> Result<Fields, Error> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(Error::JSONSerializationError(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Collection-level access to the documents backing the app.
///
/// Implementations must be safe to share between request handlers.
pub trait DocumentStore: Send + Sync + Debug {
    /// Get every document in `collection`, in no particular order.
    fn list_all(&self, collection: Collection) -> Result<Vec<Document>, Error>;

    /// Get up to `limit` documents from `collection` ordered by the value of
    /// `order_by`. Documents without the field sort as the smallest value.
    fn list_recent(
        &self,
        collection: Collection,
        order_by: &str,
        order: SortOrder,
        limit: usize,
    ) -> Result<Vec<Document>, Error>;

    /// Get a single document.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no document with `id`.
    fn get(&self, collection: Collection, id: &DocumentId) -> Result<Document, Error>;

    /// Add a document and return its generated ID.
    fn create(&self, collection: Collection, fields: Fields) -> Result<DocumentId, Error>;

    /// Merge `fields` into an existing document. Nested objects are merged
    /// recursively and `null` values remove a field.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no document with `id`.
    fn update(&self, collection: Collection, id: &DocumentId, fields: Fields)
    -> Result<(), Error>;

    /// Delete a document.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no document with `id`.
    fn delete(&self, collection: Collection, id: &DocumentId) -> Result<(), Error>;
}
