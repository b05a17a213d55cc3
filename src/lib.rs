//! Storefront Admin is a web dashboard for running a small online shop.
//!
//! This library provides a REST API that directly serves HTML pages for
//! browsing sales statistics and managing products, customers and
//! transactions kept in a document store.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod customer;
mod dashboard;
mod db;
mod endpoints;
mod form;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod pagination;
mod product;
mod routing;
mod store;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::{initialize as initialize_db, seed_demo_data};
pub use logging::logging_middleware;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use store::{Collection, Document, DocumentId, DocumentStore, SortOrder, SqliteDocumentStore};

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a product name.
    #[error("Product name cannot be empty")]
    EmptyProductName,

    /// An empty string was used to create a customer name.
    #[error("Customer name cannot be empty")]
    EmptyCustomerName,

    /// An empty string was used as the order ID of a transaction.
    #[error("Order ID cannot be empty")]
    EmptyOrderId,

    /// A price or transaction amount was below zero.
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    /// A numeric form field could not be parsed.
    ///
    /// Callers should pass in the name of the field and the text that could
    /// not be parsed.
    #[error("{0} must be a number, got \"{1}\"")]
    InvalidNumber(&'static str, String),

    /// The pasted or uploaded product data could not be used for an import.
    ///
    /// Nothing is written to the store when this error occurs.
    #[error("{0}")]
    InvalidImport(String),

    /// Some, but not all, products in an import batch were written.
    #[error("imported {created} of {total} products")]
    IncompleteImport {
        /// The number of products that were written.
        created: usize,
        /// The number of products in the batch.
        total: usize,
    },

    /// The multipart form could not be parsed.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a product that does not exist
    #[error("tried to update a product that is not in the database")]
    UpdateMissingProduct,

    /// Tried to delete a product that does not exist
    #[error("tried to delete a product that is not in the database")]
    DeleteMissingProduct,

    /// Tried to update a customer that does not exist
    #[error("tried to update a customer that is not in the database")]
    UpdateMissingCustomer,

    /// Tried to delete a customer that does not exist
    #[error("tried to delete a customer that is not in the database")]
    DeleteMissingCustomer,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::SqlError(_) | Error::DatabaseLockError => InternalServerError {
                description: "Could not load data",
                fix: "The data store could not be reached. Try again later or check the server logs.",
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::InvalidImport(reason) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not import products".to_owned(),
                    details: format!("{reason}. No products were imported."),
                },
            ),
            Error::IncompleteImport { created, total } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Import only partially completed".to_owned(),
                    details: format!(
                        "Imported {created} of {total} products before an error occurred. \
                        Check the product list before retrying."
                    ),
                },
            ),
            Error::MultipartError(reason) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not read the uploaded file".to_owned(),
                    details: reason,
                },
            ),
            Error::UpdateMissingProduct => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update product".to_owned(),
                    details: "The product could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingProduct => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete product".to_owned(),
                    details: "The product could not be found. \
                        Try refreshing the page to see if the product has already been deleted."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingCustomer => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update customer".to_owned(),
                    details: "The customer could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingCustomer => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete customer".to_owned(),
                    details: "The customer could not be found. \
                        Try refreshing the page to see if the customer has already been deleted."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update transaction".to_owned(),
                    details: "The transaction could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete transaction".to_owned(),
                    details: "The transaction could not be found. \
                        Try refreshing the page to see if the transaction has already been deleted."
                        .to_owned(),
                },
            ),
            Error::SqlError(_) | Error::DatabaseLockError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not reach the data store".to_owned(),
                    details: "Nothing was saved. Try again later or check the server logs."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
