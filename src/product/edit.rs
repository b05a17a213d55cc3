//! Product editing page and endpoint.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    form::form_error,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    product::{
        form::{ProductForm, product_form_fields},
        get_product, update_product,
    },
    store::{DocumentId, DocumentStore},
};

/// The state needed for the edit product page and endpoint.
#[derive(Debug, Clone)]
pub struct EditProductState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for EditProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Render the product editing page.
pub async fn get_edit_product_page(
    Path(product_id): Path<DocumentId>,
    State(state): State<EditProductState>,
) -> Result<Response, Error> {
    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_PRODUCT_VIEW, product_id.as_ref());
    let update_endpoint = endpoints::format_endpoint(endpoints::PRODUCT, product_id.as_ref());

    let (form, error_message) = match get_product(&product_id, state.store.as_ref()) {
        Ok(product) => (ProductForm::from(&product), ""),
        Err(Error::NotFound) => (ProductForm::default(), "Product not found"),
        Err(error) => {
            tracing::error!("Failed to retrieve product {product_id}: {error}");
            (ProductForm::default(), "Failed to load product")
        }
    };

    let content = html! {
        (NavBar::new(&edit_endpoint).into_html())
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Product" }
            (edit_product_form_view(&update_endpoint, &form, error_message))
        }
    };

    Ok(base("Edit Product", &[], &content).into_response())
}

/// Handle product update form submission.
///
/// The creation time of the product is left unchanged.
pub async fn update_product_endpoint(
    Path(product_id): Path<DocumentId>,
    State(state): State<EditProductState>,
    Form(form): Form<ProductForm>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::PRODUCT, product_id.as_ref());

    let product = match form.to_product() {
        Ok(product) => product,
        Err(error) => {
            return edit_product_form_view(&update_endpoint, &form, &format!("Error: {error}"))
                .into_response();
        }
    };

    match update_product(&product_id, &product, state.store.as_ref()) {
        Ok(_) => (
            HxRedirect(endpoints::PRODUCTS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingProduct) => Error::UpdateMissingProduct.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating product {product_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_product_form_view(update_endpoint: &str, form: &ProductForm, error_message: &str) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (product_form_fields(form))
            (form_error(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Product" }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
    };
    use serde_json::json;

    use crate::{
        endpoints,
        product::{form::ProductForm, get_product},
        store::{Collection, DocumentId},
        test_utils::{
            assert_alert, assert_form_error_message, assert_form_input_with_value,
            assert_hx_endpoint, assert_hx_redirect, assert_valid_html, get_test_store, insert,
            must_get_form, parse_html_document, parse_html_fragment,
        },
    };

    use super::{EditProductState, get_edit_product_page, update_product_endpoint};

    #[tokio::test]
    async fn page_is_prefilled() {
        let store = get_test_store();
        let id = insert(
            store.as_ref(),
            Collection::Products,
            json!({
                "name": "Sarung",
                "description": "Hand woven",
                "price": 180000,
                "stock": 3,
                "gender": "male",
                "color": ["green", "gold"],
            }),
        );

        let response = get_edit_product_page(Path(id.clone()), State(EditProductState { store }))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &endpoints::format_endpoint(endpoints::PRODUCT, id.as_ref()),
            "hx-put",
        );
        assert_form_input_with_value(&form, "name", "Sarung");
        assert_form_input_with_value(&form, "description", "Hand woven");
        assert_form_input_with_value(&form, "price", "180000");
        assert_form_input_with_value(&form, "stock", "3");
        assert_form_input_with_value(&form, "gender", "male");
        assert_form_input_with_value(&form, "colors", "green, gold");
    }

    #[tokio::test]
    async fn page_for_missing_product_shows_error() {
        let response = get_edit_product_page(
            Path(DocumentId::new("missing")),
            State(EditProductState {
                store: get_test_store(),
            }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Product not found");
    }

    #[tokio::test]
    async fn can_update_product() {
        let store = get_test_store();
        let id = insert(
            store.as_ref(),
            Collection::Products,
            json!({
                "name": "Sarung",
                "price": 180000,
                "created_at": "2025-01-02T03:04:05Z",
            }),
        );
        let form = ProductForm {
            name: "Sarung Tenun".to_owned(),
            price: "200000".to_owned(),
            stock: "7".to_owned(),
            tags: "handmade".to_owned(),
            ..Default::default()
        };

        let response = update_product_endpoint(
            Path(id.clone()),
            State(EditProductState {
                store: store.clone(),
            }),
            Form(form),
        )
        .await;

        assert_hx_redirect(&response, endpoints::PRODUCTS_VIEW);
        let got = get_product(&id, store.as_ref()).unwrap();
        assert_eq!(got.name, "Sarung Tenun");
        assert_eq!(got.price, 200_000.0);
        assert_eq!(got.stock, 7);
        assert_eq!(got.tags, ["handmade"]);
        assert!(got.created_at.is_some());
    }

    #[tokio::test]
    async fn update_missing_product_returns_not_found_alert() {
        let form = ProductForm {
            name: "Anything".to_owned(),
            price: "1".to_owned(),
            ..Default::default()
        };

        let response = update_product_endpoint(
            Path(DocumentId::new("missing")),
            State(EditProductState {
                store: get_test_store(),
            }),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        assert_alert(&html, "error", "Could not update product");
    }

    #[tokio::test]
    async fn update_rejects_empty_name() {
        let store = get_test_store();
        let id = insert(store.as_ref(), Collection::Products, json!({ "name": "Sarung" }));
        let form = ProductForm {
            price: "1".to_owned(),
            ..Default::default()
        };

        let response = update_product_endpoint(
            Path(id.clone()),
            State(EditProductState {
                store: store.clone(),
            }),
            Form(form),
        )
        .await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Product name cannot be empty");
        assert_eq!(get_product(&id, store.as_ref()).unwrap().name, "Sarung");
    }
}
