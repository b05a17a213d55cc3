use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    store::{
        Collection, Document, DocumentId, DocumentStore, Record, encode, lenient_string,
        lenient_timestamp, timestamp,
    },
};

/// A validated, non-empty customer name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerName(String);

impl CustomerName {
    /// Create a customer name.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyCustomerName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCustomerName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }
}

impl Display for CustomerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shop customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(skip)]
    pub id: DocumentId,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub image_url: String,
    #[serde(
        deserialize_with = "lenient_timestamp",
        serialize_with = "timestamp::option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

impl Record for Customer {
    const KEY_ALIASES: &'static [(&'static str, &'static str)] = &[
        ("imageUrl", "image_url"),
        ("avatar", "image_url"),
        ("createdAt", "created_at"),
    ];
}

pub fn get_all_customers(store: &dyn DocumentStore) -> Result<Vec<Customer>, Error> {
    Ok(store
        .list_all(Collection::Customers)?
        .iter()
        .map(decode_customer)
        .collect())
}

pub fn get_customer(id: &DocumentId, store: &dyn DocumentStore) -> Result<Customer, Error> {
    store
        .get(Collection::Customers, id)
        .map(|document| decode_customer(&document))
}

pub fn create_customer(
    customer: &Customer,
    store: &dyn DocumentStore,
) -> Result<DocumentId, Error> {
    store.create(Collection::Customers, encode(customer)?)
}

/// Replace the editable fields of the customer with `id`.
///
/// # Errors
///
/// Returns [Error::UpdateMissingCustomer] if there is no customer with `id`.
pub fn update_customer(
    id: &DocumentId,
    customer: &Customer,
    store: &dyn DocumentStore,
) -> Result<(), Error> {
    store
        .update(Collection::Customers, id, encode(customer)?)
        .map_err(|error| match error {
            Error::NotFound => Error::UpdateMissingCustomer,
            error => error,
        })
}

/// Delete the customer with `id`.
///
/// Transactions that refer to the customer are left untouched.
///
/// # Errors
///
/// Returns [Error::DeleteMissingCustomer] if there is no customer with `id`.
pub fn delete_customer(id: &DocumentId, store: &dyn DocumentStore) -> Result<(), Error> {
    store
        .delete(Collection::Customers, id)
        .map_err(|error| match error {
            Error::NotFound => Error::DeleteMissingCustomer,
            error => error,
        })
}

fn decode_customer(document: &Document) -> Customer {
    Customer {
        id: document.id.clone(),
        ..document.decode::<Customer>()
    }
}
