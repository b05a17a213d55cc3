//! Product deletion endpoint.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    alert::Alert,
    product::delete_product,
    store::{DocumentId, DocumentStore},
};

/// The state needed for deleting a product.
#[derive(Debug, Clone)]
pub struct DeleteProductState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for DeleteProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Handle product deletion. Returns success alert or error.
pub async fn delete_product_endpoint(
    Path(product_id): Path<DocumentId>,
    State(state): State<DeleteProductState>,
) -> Response {
    match delete_product(&product_id, state.store.as_ref()) {
        Ok(_) => Alert::SuccessSimple {
            message: "Product deleted successfully".to_owned(),
        }
        .into_response(),
        Err(Error::DeleteMissingProduct) => Error::DeleteMissingProduct.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting product {product_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
