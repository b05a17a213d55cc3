//! Transaction creation page and endpoint.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    form::{InputField, form_error, parse_amount, select_field},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::DocumentStore,
    transaction::{NewCustomerDetails, NewTransaction, TransactionStatus, create_transaction},
};

/// The state needed for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Form data for creating a transaction.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewTransactionForm {
    pub order_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub status: String,
    pub payment_method: String,
    pub total_amount: String,
}

/// Render the page for creating a transaction.
pub async fn get_new_transaction_page() -> Response {
    let form = new_transaction_form_view(&NewTransactionForm::default(), "");

    let content = html! {
        (NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html())
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "New Transaction" }
            (form)
        }
    };

    base("New Transaction", &[], &content).into_response()
}

/// Handle transaction creation form submission.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<NewTransactionForm>,
) -> Response {
    let order_id = form.order_id.trim();
    if order_id.is_empty() {
        return new_transaction_form_view(&form, &format!("Error: {}", Error::EmptyOrderId))
            .into_response();
    }

    let total_amount = match parse_amount("Total amount", &form.total_amount) {
        Ok(amount) => amount,
        Err(error) => {
            return new_transaction_form_view(&form, &format!("Error: {error}")).into_response();
        }
    };

    let transaction = NewTransaction {
        order_id,
        status: TransactionStatus::parse(&form.status),
        total_amount,
        payment_method: form.payment_method.trim(),
        customer_id: form.customer_id.trim(),
        customer_details: NewCustomerDetails {
            name: form.customer_name.trim(),
            phone: form.customer_phone.trim(),
            email: form.customer_email.trim(),
        },
        created_at: OffsetDateTime::now_utc(),
    };

    match create_transaction(&transaction, state.store.as_ref()) {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a transaction: {error}");
            error.into_alert_response()
        }
    }
}

fn new_transaction_form_view(form: &NewTransactionForm, error_message: &str) -> Markup {
    let status = if form.status.is_empty() {
        "pending"
    } else {
        form.status.as_str()
    };

    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (InputField::text("order_id", "Order ID", &form.order_id)
                .placeholder("ORD-1001")
                .required()
                .into_html())
            (InputField::text("customer_id", "Customer ID", &form.customer_id).into_html())
            (InputField::text("customer_name", "Customer Name", &form.customer_name).into_html())
            (InputField::text("customer_phone", "Customer Phone", &form.customer_phone)
                .type_("tel")
                .into_html())
            (InputField::text("customer_email", "Customer Email", &form.customer_email)
                .type_("email")
                .into_html())
            (select_field("status", "Status", &TransactionStatus::FORM_OPTIONS, status))
            (InputField::text("payment_method", "Payment Method", &form.payment_method)
                .placeholder("bank_transfer")
                .into_html())
            (InputField::text("total_amount", "Total Amount", &form.total_amount)
                .type_("number")
                .required()
                .into_html())

            (form_error(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Transaction" }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Form, extract::State, http::StatusCode};

    use crate::{
        endpoints,
        test_utils::{
            assert_form_error_message, assert_form_input, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_hx_redirect, assert_status_ok, assert_valid_html,
            get_test_store, must_get_form, parse_html_document, parse_html_fragment,
        },
        transaction::{TransactionStatus, get_all_transactions},
    };

    use super::{
        CreateTransactionState, NewTransactionForm, create_transaction_endpoint,
        get_new_transaction_page,
    };

    fn valid_form() -> NewTransactionForm {
        NewTransactionForm {
            order_id: "ORD-1".to_owned(),
            customer_name: "Siti".to_owned(),
            status: "success".to_owned(),
            payment_method: "gopay".to_owned(),
            total_amount: "125000".to_owned(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn render_page() {
        let response = get_new_transaction_page().await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input(&form, "order_id", "text");
        assert_form_input(&form, "total_amount", "number");
        assert_form_submit_button_with_text(&form, "Create Transaction");
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let store = get_test_store();
        let state = CreateTransactionState {
            store: store.clone(),
        };

        let response = create_transaction_endpoint(State(state), Form(valid_form())).await;

        assert_hx_redirect(&response, endpoints::TRANSACTIONS_VIEW);
        let transactions = get_all_transactions(store.as_ref()).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].order_id, "ORD-1");
        assert_eq!(transactions[0].status, TransactionStatus::Success);
        assert_eq!(transactions[0].total_amount, 125_000.0);
        assert!(transactions[0].created_at.is_some());
    }

    #[tokio::test]
    async fn rejects_negative_amount() {
        let store = get_test_store();
        let state = CreateTransactionState {
            store: store.clone(),
        };
        let form = NewTransactionForm {
            total_amount: "-1".to_owned(),
            ..valid_form()
        };

        let response = create_transaction_endpoint(State(state), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Total amount cannot be negative");
        assert!(get_all_transactions(store.as_ref()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_empty_order_id() {
        let store = get_test_store();
        let state = CreateTransactionState {
            store: store.clone(),
        };
        let form = NewTransactionForm {
            order_id: "  ".to_owned(),
            ..valid_form()
        };

        let response = create_transaction_endpoint(State(state), Form(form)).await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Order ID cannot be empty");
        assert!(get_all_transactions(store.as_ref()).unwrap().is_empty());
    }
}
