use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    alert::Alert,
    customer::delete_customer,
    store::{DocumentId, DocumentStore},
};

/// The state needed for deleting a customer.
#[derive(Debug, Clone)]
pub struct DeleteCustomerState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for DeleteCustomerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Handle customer deletion. Returns success alert or error.
pub async fn delete_customer_endpoint(
    Path(customer_id): Path<DocumentId>,
    State(state): State<DeleteCustomerState>,
) -> Response {
    match delete_customer(&customer_id, state.store.as_ref()) {
        Ok(_) => Alert::SuccessSimple {
            message: "Customer deleted successfully".to_owned(),
        }
        .into_response(),
        Err(Error::DeleteMissingCustomer) => Error::DeleteMissingCustomer.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting customer {customer_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use serde_json::json;

    use crate::{
        Error,
        customer::get_customer,
        store::{Collection, DocumentId},
        test_utils::{assert_alert, assert_status_ok, get_test_store, insert, parse_html_fragment},
    };

    use super::{DeleteCustomerState, delete_customer_endpoint};

    #[tokio::test]
    async fn can_delete_customer() {
        let store = get_test_store();
        let id = insert(store.as_ref(), Collection::Customers, json!({ "name": "Agus" }));

        let response = delete_customer_endpoint(
            Path(id.clone()),
            State(DeleteCustomerState {
                store: store.clone(),
            }),
        )
        .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_alert(&html, "success", "Customer deleted successfully");
        assert_eq!(get_customer(&id, store.as_ref()), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn delete_missing_customer_returns_not_found() {
        let response = delete_customer_endpoint(
            Path(DocumentId::new("missing")),
            State(DeleteCustomerState {
                store: get_test_store(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        assert_alert(&html, "error", "Could not delete customer");
    }
}
