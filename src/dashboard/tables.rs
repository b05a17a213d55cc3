//! Table views for the order summary and the latest transactions.

use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    dashboard::aggregation::DashboardSummary,
    endpoints,
    html::{
        LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
        format_timestamp,
    },
    transaction::{Transaction, status_badge},
};

const SECTION_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200
    dark:border-gray-700 rounded-lg p-4 shadow-md";

/// Renders the totals of the sales chart alongside the transaction counts.
pub(super) fn order_summary_view(summary: &DashboardSummary) -> Markup {
    let rows = [
        ("Total sales", format_currency(summary.total_sales)),
        ("Successful transactions", summary.sales_count.to_string()),
        ("Pending transactions", summary.pending_count.to_string()),
        (
            "Average order value",
            format_currency(summary.average_order_value),
        ),
    ];

    html! {
        section id="order-summary" class=(SECTION_STYLE)
        {
            h3 class="text-xl font-semibold mb-4" { "Order summary" }

            dl class="divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for (label, value) in rows {
                    div class="flex justify-between py-3"
                    {
                        dt class="text-gray-600 dark:text-gray-400" { (label) }
                        dd class="font-semibold tabular-nums" { (value) }
                    }
                }
            }
        }
    }
}

/// Renders the most recent transactions with a link to the full list.
pub(super) fn recent_transactions_view(
    transactions: &[Transaction],
    local_offset: UtcOffset,
) -> Markup {
    html! {
        section id="recent-transactions" class={ (SECTION_STYLE) " w-full overflow-x-auto" }
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h3 class="text-xl font-semibold" { "Recent transactions" }
                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "View all" }
            }

            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Order ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Customer" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Payment" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Total" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class={ (TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white" }
                            {
                                (transaction.order_id)
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.customer_label()) }
                            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
                            {
                                (format_timestamp(transaction.created_at, local_offset))
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.payment_method) }
                            td class={ (TABLE_CELL_STYLE) " tabular-nums text-right" }
                            {
                                (format_currency(transaction.total_amount))
                            }
                            td class=(TABLE_CELL_STYLE) { (status_badge(&transaction.status)) }
                        }
                    }

                    @if transactions.is_empty() {
                        tr
                        {
                            td
                                colspan="6"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No transactions yet."
                            }
                        }
                    }
                }
            }
        }
    }
}
