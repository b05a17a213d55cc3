//! The paginated transactions page.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    AppState, Error, endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links, format_currency, format_timestamp,
    },
    navigation::NavBar,
    pagination::{
        Pagination, PaginationConfig, clamp_page, create_pagination_indicators, page_count,
        page_slice, pagination_view,
    },
    store::DocumentStore,
    timezone::get_local_offset,
    transaction::{Transaction, TransactionStatus, get_all_transactions, sort_newest_first},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    pub store: Arc<dyn DocumentStore>,
    pub local_timezone: String,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Render a page of transactions, newest first.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Query(pagination): Query<Pagination>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;

    let mut transactions = get_all_transactions(state.store.as_ref())
        .inspect_err(|error| tracing::error!("Failed to retrieve transactions: {error}"))?;
    sort_newest_first(&mut transactions);

    let (page, per_page) = pagination.resolve(&state.pagination_config);
    let page_count = page_count(transactions.len(), per_page);
    let page = clamp_page(page, page_count);
    let indicators =
        create_pagination_indicators(page, page_count, state.pagination_config.max_pages);

    let first_row_number = (page - 1).saturating_mul(per_page).saturating_add(1);
    let rows = page_slice(&transactions, page, per_page);

    let content = html! {
        (NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-6xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Create Transaction"
                    }
                }

                (transaction_cards_view(rows, local_offset))
                (transactions_table_view(rows, first_row_number, local_offset))
                (pagination_view(endpoints::TRANSACTIONS_VIEW, &indicators, per_page))
            }
        }
    };

    Ok(base("Transactions", &[], &content).into_response())
}

/// A coloured badge for a transaction status.
pub fn status_badge(status: &TransactionStatus) -> Markup {
    let style = match status {
        TransactionStatus::Success => {
            "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-300"
        }
        TransactionStatus::Pending => {
            "bg-yellow-100 text-yellow-800 dark:bg-yellow-900 dark:text-yellow-300"
        }
        TransactionStatus::Other(_) => "bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-300",
    };

    html! {
        span
            class={ "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold rounded-full " (style) }
            data-status=(status.as_str())
        {
            (status)
        }
    }
}

fn action_links(transaction: &Transaction) -> Markup {
    let id = transaction.id.as_ref();

    edit_delete_action_links(
        &endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, id),
        &endpoints::format_endpoint(endpoints::TRANSACTION, id),
        &format!(
            "Are you sure you want to delete transaction '{}'? This cannot be undone.",
            transaction.order_id
        ),
        "closest [data-transaction-row]",
        "delete",
    )
}

fn transactions_table_view(
    transactions: &[Transaction],
    first_row_number: u64,
    local_offset: UtcOffset,
) -> Markup {
    html! {
        section class="hidden lg:block dark:bg-gray-800"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "#" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Order ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Payment Method" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Customer" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for (row_number, transaction) in (first_row_number..).zip(transactions) {
                        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
                        {
                            td class=(TABLE_CELL_STYLE) { (row_number) }
                            td class=(TABLE_CELL_STYLE) { (transaction.order_id) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                (format_timestamp(transaction.created_at, local_offset))
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.payment_method) }
                            td class=(TABLE_CELL_STYLE) { (transaction.customer_label()) }
                            td class=(TABLE_CELL_STYLE) { (status_badge(&transaction.status)) }
                            td class={ (TABLE_CELL_STYLE) " tabular-nums text-right" }
                            {
                                (format_currency(transaction.total_amount))
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                div class="flex gap-4" { (action_links(transaction)) }
                            }
                        }
                    }

                    @if transactions.is_empty() {
                        tr
                        {
                            td
                                colspan="8"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No transactions found."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_cards_view(transactions: &[Transaction], local_offset: UtcOffset) -> Markup {
    html! {
        ul class="lg:hidden space-y-4"
        {
            @for transaction in transactions {
                li
                    class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm
                        dark:border-gray-700 dark:bg-gray-800"
                    data-transaction-row="true"
                {
                    div class="flex items-start justify-between gap-3"
                    {
                        div
                        {
                            p class="font-semibold" { (transaction.order_id) }
                            p class="text-xs text-gray-500 dark:text-gray-400"
                            {
                                (format_timestamp(transaction.created_at, local_offset))
                                " · "
                                (transaction.customer_label())
                            }
                        }

                        span class="text-sm tabular-nums text-gray-900 dark:text-white"
                        {
                            (format_currency(transaction.total_amount))
                        }
                    }

                    div class="mt-2 flex items-center gap-4 text-sm"
                    {
                        (status_badge(&transaction.status))
                        (action_links(transaction))
                    }
                }
            }

            @if transactions.is_empty() {
                li class="text-center text-gray-500 dark:text-gray-400" { "No transactions found." }
            }
        }
    }
}
