//! Transaction editing page and endpoint.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    form::{InputField, form_error, parse_amount, select_field},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::{DocumentId, DocumentStore},
    transaction::{
        CustomerNameUpdate, Transaction, TransactionStatus, TransactionUpdate, get_transaction,
        update_transaction,
    },
};

/// The state needed for the edit transaction page and endpoint.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Form data for editing a transaction.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditTransactionForm {
    pub customer_name: String,
    pub status: String,
    pub payment_method: String,
    pub total_amount: String,
}

impl From<&Transaction> for EditTransactionForm {
    fn from(transaction: &Transaction) -> Self {
        Self {
            customer_name: transaction.customer_details.name.clone(),
            status: transaction.status.as_str().to_owned(),
            payment_method: transaction.payment_method.clone(),
            total_amount: transaction.total_amount.to_string(),
        }
    }
}

/// Render the transaction editing page.
pub async fn get_edit_transaction_page(
    Path(transaction_id): Path<DocumentId>,
    State(state): State<EditTransactionState>,
) -> Result<Response, Error> {
    let edit_endpoint =
        endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction_id.as_ref());
    let update_endpoint =
        endpoints::format_endpoint(endpoints::TRANSACTION, transaction_id.as_ref());

    let (order_id, form, error_message) =
        match get_transaction(&transaction_id, state.store.as_ref()) {
            Ok(transaction) => (
                transaction.order_id.clone(),
                EditTransactionForm::from(&transaction),
                "",
            ),
            Err(Error::NotFound) => (String::new(), Default::default(), "Transaction not found"),
            Err(error) => {
                tracing::error!("Failed to retrieve transaction {transaction_id}: {error}");
                (String::new(), Default::default(), "Failed to load transaction")
            }
        };

    let content = html! {
        (NavBar::new(&edit_endpoint).into_html())
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4"
            {
                "Edit Transaction "
                @if !order_id.is_empty() { (order_id) }
            }
            (edit_transaction_form_view(&update_endpoint, &form, error_message))
        }
    };

    Ok(base("Edit Transaction", &[], &content).into_response())
}

/// Handle transaction update form submission.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<DocumentId>,
    State(state): State<EditTransactionState>,
    Form(form): Form<EditTransactionForm>,
) -> Response {
    let update_endpoint =
        endpoints::format_endpoint(endpoints::TRANSACTION, transaction_id.as_ref());

    let total_amount = match parse_amount("Total amount", &form.total_amount) {
        Ok(amount) => amount,
        Err(error) => {
            return edit_transaction_form_view(&update_endpoint, &form, &format!("Error: {error}"))
                .into_response();
        }
    };

    let update = TransactionUpdate {
        status: TransactionStatus::parse(&form.status),
        total_amount,
        payment_method: form.payment_method.trim(),
        customer_details: CustomerNameUpdate {
            name: form.customer_name.trim(),
        },
    };

    match update_transaction(&transaction_id, &update, state.store.as_ref()) {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingTransaction) => {
            Error::UpdateMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating transaction {transaction_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_transaction_form_view(
    update_endpoint: &str,
    form: &EditTransactionForm,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (InputField::text("customer_name", "Customer Name", &form.customer_name).into_html())
            (select_field("status", "Status", &status_options(&form.status), &form.status))
            (InputField::text("payment_method", "Payment Method", &form.payment_method).into_html())
            (InputField::text("total_amount", "Total Amount", &form.total_amount)
                .type_("number")
                .required()
                .into_html())

            (form_error(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Transaction" }
        }
    }
}

/// The form's statuses plus `current` when it is one the form does not offer,
/// so saving the form does not silently change it.
fn status_options(current: &str) -> Vec<(&str, &str)> {
    let mut options: Vec<(&str, &str)> = TransactionStatus::FORM_OPTIONS.to_vec();

    if !options.iter().any(|(value, _)| *value == current) {
        let label = if current.is_empty() { "Unknown" } else { current };
        options.push((current, label));
    }

    options
}
