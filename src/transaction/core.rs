//! Transaction records and their store operations.

use std::{cmp::Reverse, fmt::Display};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;

use crate::{
    Error,
    store::{
        Collection, Document, DocumentId, DocumentStore, Record, encode, lenient,
        lenient_amount, lenient_string, lenient_timestamp, timestamp,
    },
};

/// The state of an order's payment, assigned by the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    /// Waiting for payment.
    Pending,
    /// Paid.
    Success,
    /// Any other status, e.g. "failed" or "expired". Empty if missing.
    Other(String),
}

impl TransactionStatus {
    /// The statuses offered in the transaction forms.
    pub const FORM_OPTIONS: [(&'static str, &'static str); 3] = [
        ("pending", "Pending"),
        ("success", "Success"),
        ("failed", "Failed"),
    ];

    /// Parse a status, ignoring case and surrounding whitespace.
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "success" => Self::Success,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The stored form of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Other(status) => status,
        }
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_str() {
            "" => write!(f, "unknown"),
            status => write!(f, "{status}"),
        }
    }
}

impl Serialize for TransactionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = lenient_string(deserializer)?;

        Ok(Self::parse(&text))
    }
}

/// The contact details a customer entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CustomerDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
}

/// An order placed by a customer, as read from the store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(skip)]
    pub id: DocumentId,
    #[serde(deserialize_with = "lenient_string")]
    pub order_id: String,
    pub status: TransactionStatus,
    #[serde(deserialize_with = "lenient_amount")]
    pub total_amount: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub payment_method: String,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(deserialize_with = "lenient_string")]
    pub customer_id: String,
    #[serde(deserialize_with = "lenient")]
    pub customer_details: CustomerDetails,
}

impl Record for Transaction {
    const KEY_ALIASES: &'static [(&'static str, &'static str)] = &[
        ("orderId", "order_id"),
        ("payment_type", "payment_method"),
        ("paymentType", "payment_method"),
        ("paymentMethod", "payment_method"),
        ("totalAmount", "total_amount"),
        ("amount", "total_amount"),
        ("createdAt", "created_at"),
        ("userId", "customer_id"),
        ("user_id", "customer_id"),
        ("customerDetails", "customer_details"),
    ];
}

impl Transaction {
    /// The name to show for the customer: their name, else their phone
    /// number, else "N/A".
    pub fn customer_label(&self) -> &str {
        let details = &self.customer_details;

        if !details.name.is_empty() {
            &details.name
        } else if !details.phone.is_empty() {
            &details.phone
        } else {
            "N/A"
        }
    }
}

/// Customer contact details entered in the new transaction form.
#[derive(Debug, Serialize)]
pub struct NewCustomerDetails<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
}

/// The fields of a transaction entered in the new transaction form.
#[derive(Debug, Serialize)]
pub struct NewTransaction<'a> {
    pub order_id: &'a str,
    pub status: TransactionStatus,
    pub total_amount: f64,
    pub payment_method: &'a str,
    pub customer_id: &'a str,
    pub customer_details: NewCustomerDetails<'a>,
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
}

/// The fields an administrator may change on an existing transaction.
///
/// Customer details are merged, so only the name is replaced.
#[derive(Debug, Serialize)]
pub struct TransactionUpdate<'a> {
    pub status: TransactionStatus,
    pub total_amount: f64,
    pub payment_method: &'a str,
    pub customer_details: CustomerNameUpdate<'a>,
}

#[derive(Debug, Serialize)]
pub struct CustomerNameUpdate<'a> {
    pub name: &'a str,
}

/// Get every transaction in the store.
pub fn get_all_transactions(store: &dyn DocumentStore) -> Result<Vec<Transaction>, Error> {
    Ok(store
        .list_all(Collection::Transactions)?
        .iter()
        .map(decode_transaction)
        .collect())
}

/// Order `transactions` newest first by their decoded creation time.
///
/// Transactions without a readable timestamp go last.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|transaction| Reverse(transaction.created_at));
}

/// The `limit` most recently created of `transactions`, newest first.
///
/// Timestamps are compared after decoding, so documents that store them as
/// text, unix seconds or `{seconds, nanoseconds}` objects order correctly
/// against each other.
pub fn most_recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut recent = transactions.to_vec();
    sort_newest_first(&mut recent);
    recent.truncate(limit);
    recent
}

/// Get a single transaction.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no transaction with `id`.
pub fn get_transaction(id: &DocumentId, store: &dyn DocumentStore) -> Result<Transaction, Error> {
    store
        .get(Collection::Transactions, id)
        .map(|document| decode_transaction(&document))
}

/// Add a transaction and return its ID.
pub fn create_transaction(
    transaction: &NewTransaction,
    store: &dyn DocumentStore,
) -> Result<DocumentId, Error> {
    store.create(Collection::Transactions, encode(transaction)?)
}

/// Apply `update` to the transaction with `id`.
///
/// # Errors
///
/// Returns [Error::UpdateMissingTransaction] if there is no transaction with `id`.
pub fn update_transaction(
    id: &DocumentId,
    update: &TransactionUpdate,
    store: &dyn DocumentStore,
) -> Result<(), Error> {
    store
        .update(Collection::Transactions, id, encode(update)?)
        .map_err(|error| match error {
            Error::NotFound => Error::UpdateMissingTransaction,
            error => error,
        })
}

/// Delete the transaction with `id`.
///
/// # Errors
///
/// Returns [Error::DeleteMissingTransaction] if there is no transaction with `id`.
pub fn delete_transaction(id: &DocumentId, store: &dyn DocumentStore) -> Result<(), Error> {
    store
        .delete(Collection::Transactions, id)
        .map_err(|error| match error {
            Error::NotFound => Error::DeleteMissingTransaction,
            error => error,
        })
}

fn decode_transaction(document: &Document) -> Transaction {
    Transaction {
        id: document.id.clone(),
        ..document.decode::<Transaction>()
    }
}
