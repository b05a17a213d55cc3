//! Product creation page and endpoint.

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
    AppState, endpoints,
    form::form_error,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    product::{
        Product, create_product,
        form::{ProductForm, product_form_fields},
        import::import_form_view,
    },
    store::DocumentStore,
};

/// The state needed for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for CreateProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Render the page with the single product form and the bulk import form.
pub async fn get_new_product_page() -> Response {
    let content = html! {
        (NavBar::new(endpoints::NEW_PRODUCT_VIEW).into_html())
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "New Product" }
            (new_product_form_view(&ProductForm::default(), ""))

            hr class="w-full my-8 border-gray-300 dark:border-gray-600";

            h2 class="text-lg font-bold mb-4" { "Import Products" }
            (import_form_view())
        }
    };

    base("New Product", &[], &content).into_response()
}

/// Handle product creation form submission.
pub async fn create_product_endpoint(
    State(state): State<CreateProductState>,
    Form(form): Form<ProductForm>,
) -> Response {
    let product = match form.to_product() {
        Ok(product) => Product {
            created_at: Some(OffsetDateTime::now_utc()),
            ..product
        },
        Err(error) => {
            return new_product_form_view(&form, &format!("Error: {error}")).into_response();
        }
    };

    match create_product(&product, state.store.as_ref()) {
        Ok(_) => (
            HxRedirect(endpoints::PRODUCTS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a product: {error}");
            error.into_alert_response()
        }
    }
}

fn new_product_form_view(form: &ProductForm, error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::PRODUCTS_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (product_form_fields(form))
            (form_error(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Product" }
        }
    }
}
