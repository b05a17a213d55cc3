//! Customer editing page and endpoint.

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
    AppState, Error,
    customer::{
        form::{CustomerForm, customer_form_fields},
        get_customer, update_customer,
    },
    endpoints,
    form::form_error,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::{DocumentId, DocumentStore},
};

/// The state needed for the edit customer page and endpoint.
#[derive(Debug, Clone)]
pub struct EditCustomerState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for EditCustomerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Render the customer editing page.
pub async fn get_edit_customer_page(
    Path(customer_id): Path<DocumentId>,
    State(state): State<EditCustomerState>,
) -> Result<Response, Error> {
    let edit_endpoint =
        endpoints::format_endpoint(endpoints::EDIT_CUSTOMER_VIEW, customer_id.as_ref());
    let update_endpoint = endpoints::format_endpoint(endpoints::CUSTOMER, customer_id.as_ref());

    let (form, error_message) = match get_customer(&customer_id, state.store.as_ref()) {
        Ok(customer) => (CustomerForm::from(&customer), ""),
        Err(Error::NotFound) => (CustomerForm::default(), "Customer not found"),
        Err(error) => {
            tracing::error!("Failed to retrieve customer {customer_id}: {error}");
            (CustomerForm::default(), "Failed to load customer")
        }
    };

    let content = html! {
        (NavBar::new(&edit_endpoint).into_html())
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Customer" }
            (edit_customer_form_view(&update_endpoint, &form, error_message))
        }
    };

    Ok(base("Edit Customer", &[], &content).into_response())
}

/// Handle customer update form submission.
pub async fn update_customer_endpoint(
    Path(customer_id): Path<DocumentId>,
    State(state): State<EditCustomerState>,
    Form(form): Form<CustomerForm>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::CUSTOMER, customer_id.as_ref());

    let customer = match form.to_customer() {
        Ok(customer) => customer,
        Err(error) => {
            return edit_customer_form_view(&update_endpoint, &form, &format!("Error: {error}"))
                .into_response();
        }
    };

    match update_customer(&customer_id, &customer, state.store.as_ref()) {
        Ok(_) => (
            HxRedirect(endpoints::CUSTOMERS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingCustomer) => Error::UpdateMissingCustomer.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating customer {customer_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_customer_form_view(
    update_endpoint: &str,
    form: &CustomerForm,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (customer_form_fields(form))
            (form_error(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Customer" }
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
        customer::{form::CustomerForm, get_customer},
        endpoints,
        store::{Collection, DocumentId},
        test_utils::{
            assert_alert, assert_form_error_message, assert_form_input_with_value,
            assert_hx_endpoint, assert_hx_redirect, assert_valid_html, get_test_store, insert,
            must_get_form, parse_html_document, parse_html_fragment,
        },
    };

    use super::{EditCustomerState, get_edit_customer_page, update_customer_endpoint};

    #[tokio::test]
    async fn page_is_prefilled() {
        let store = get_test_store();
        let id = insert(
            store.as_ref(),
            Collection::Customers,
            json!({ "name": "Agus", "phone": "0811", "imageUrl": "https://example.com/a.png" }),
        );

        let response =
            get_edit_customer_page(Path(id.clone()), State(EditCustomerState { store }))
                .await
                .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &endpoints::format_endpoint(endpoints::CUSTOMER, id.as_ref()),
            "hx-put",
        );
        assert_form_input_with_value(&form, "name", "Agus");
        assert_form_input_with_value(&form, "phone", "0811");
        assert_form_input_with_value(&form, "image_url", "https://example.com/a.png");
    }

    #[tokio::test]
    async fn page_for_missing_customer_shows_error() {
        let response = get_edit_customer_page(
            Path(DocumentId::new("missing")),
            State(EditCustomerState {
                store: get_test_store(),
            }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Customer not found");
    }

    #[tokio::test]
    async fn can_update_customer() {
        let store = get_test_store();
        let id = insert(store.as_ref(), Collection::Customers, json!({ "name": "Agus" }));
        let form = CustomerForm {
            name: "Agus Salim".to_owned(),
            address: "Surabaya".to_owned(),
            ..Default::default()
        };

        let response = update_customer_endpoint(
            Path(id.clone()),
            State(EditCustomerState {
                store: store.clone(),
            }),
            Form(form),
        )
        .await;

        assert_hx_redirect(&response, endpoints::CUSTOMERS_VIEW);
        let got = get_customer(&id, store.as_ref()).unwrap();
        assert_eq!(got.name, "Agus Salim");
        assert_eq!(got.address, "Surabaya");
    }

    #[tokio::test]
    async fn update_missing_customer_returns_not_found_alert() {
        let form = CustomerForm {
            name: "Agus".to_owned(),
            ..Default::default()
        };

        let response = update_customer_endpoint(
            Path(DocumentId::new("missing")),
            State(EditCustomerState {
                store: get_test_store(),
            }),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        assert_alert(&html, "error", "Could not update customer");
    }
}
