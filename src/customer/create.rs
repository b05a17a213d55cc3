//! Customer creation page and endpoint.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState,
    customer::{
        Customer, create_customer,
        form::{CustomerForm, customer_form_fields},
    },
    endpoints,
    form::form_error,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::DocumentStore,
};

/// The state needed for creating a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for CreateCustomerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Render the page for creating a customer.
pub async fn get_new_customer_page() -> Response {
    let content = html! {
        (NavBar::new(endpoints::NEW_CUSTOMER_VIEW).into_html())
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "New Customer" }
            (new_customer_form_view(&CustomerForm::default(), ""))
        }
    };

    base("New Customer", &[], &content).into_response()
}

/// Handle customer creation form submission.
pub async fn create_customer_endpoint(
    State(state): State<CreateCustomerState>,
    Form(form): Form<CustomerForm>,
) -> Response {
    let customer = match form.to_customer() {
        Ok(customer) => Customer {
            created_at: Some(OffsetDateTime::now_utc()),
            ..customer
        },
        Err(error) => {
            return new_customer_form_view(&form, &format!("Error: {error}")).into_response();
        }
    };

    match create_customer(&customer, state.store.as_ref()) {
        Ok(_) => (
            HxRedirect(endpoints::CUSTOMERS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a customer: {error}");
            error.into_alert_response()
        }
    }
}

fn new_customer_form_view(form: &CustomerForm, error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::CUSTOMERS_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (customer_form_fields(form))
            (form_error(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Customer" }
        }
    }
}
