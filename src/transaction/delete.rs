//! Transaction deletion endpoint.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    alert::Alert,
    store::{DocumentId, DocumentStore},
    transaction::delete_transaction,
};

/// The state needed for deleting a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Handle transaction deletion. Returns success alert or error.
pub async fn delete_transaction_endpoint(
    Path(transaction_id): Path<DocumentId>,
    State(state): State<DeleteTransactionState>,
) -> Response {
    match delete_transaction(&transaction_id, state.store.as_ref()) {
        Ok(_) => Alert::SuccessSimple {
            message: "Transaction deleted successfully".to_owned(),
        }
        .into_response(),
        Err(Error::DeleteMissingTransaction) => {
            Error::DeleteMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting transaction {transaction_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_transaction_endpoint_tests {
    use std::sync::Arc;

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use serde_json::json;

    use crate::{
        Error,
        store::{Collection, DocumentId},
        test_utils::{
            FailingStore, assert_alert, assert_status_ok, get_test_store, insert,
            parse_html_fragment,
        },
        transaction::get_transaction,
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    #[tokio::test]
    async fn can_delete_transaction() {
        let store = get_test_store();
        let id = insert(
            store.as_ref(),
            Collection::Transactions,
            json!({ "order_id": "ORD-1" }),
        );

        let response = delete_transaction_endpoint(
            Path(id.clone()),
            State(DeleteTransactionState {
                store: store.clone(),
            }),
        )
        .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_alert(&html, "success", "Transaction deleted successfully");
        assert_eq!(get_transaction(&id, store.as_ref()), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn delete_missing_transaction_returns_not_found() {
        let response = delete_transaction_endpoint(
            Path(DocumentId::new("missing")),
            State(DeleteTransactionState {
                store: get_test_store(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        assert_alert(&html, "error", "Could not delete transaction");
    }

    #[tokio::test]
    async fn store_failure_returns_server_error() {
        let response = delete_transaction_endpoint(
            Path(DocumentId::new("any")),
            State(DeleteTransactionState {
                store: Arc::new(FailingStore),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_fragment(response).await;
        assert_alert(&html, "error", "Could not reach the data store");
    }
}
