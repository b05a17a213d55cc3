//! The dashboard page handler and view.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    customer::get_all_customers,
    dashboard::{
        aggregation::{DashboardSummary, summarize},
        cards::{StatCard, stat_cards_view},
        charts::{DashboardChart, charts_script, charts_view, payment_methods_chart, sales_chart},
        tables::{order_summary_view, recent_transactions_view},
    },
    endpoints,
    html::{HeadElement, base, link},
    internal_server_error::InternalServerError,
    navigation::NavBar,
    product::get_all_products,
    store::DocumentStore,
    timezone::local_now,
    transaction::{Transaction, get_all_transactions, most_recent},
};

/// The number of transactions in the recent transactions table.
const RECENT_TRANSACTIONS: usize = 10;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub store: Arc<dyn DocumentStore>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Everything loaded from the store for one dashboard render.
struct DashboardData {
    product_count: usize,
    customer_count: usize,
    transactions: Vec<Transaction>,
    recent_transactions: Vec<Transaction>,
}

/// Display the overview of products, customers and sales.
///
/// If any data cannot be loaded, an error page is shown instead.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Response {
    let now = match local_now(&state.local_timezone) {
        Ok(now) => now,
        Err(error) => return error.into_response(),
    };

    match load_dashboard_data(state.store.as_ref()) {
        Ok(data) => dashboard_view(&data, now).into_response(),
        Err(error) => {
            tracing::error!("Could not load dashboard data: {error}");
            InternalServerError {
                description: "Could not load dashboard data",
                fix: "Check that the database is available, then reload the page.",
            }
            .into_response()
        }
    }
}

fn load_dashboard_data(store: &dyn DocumentStore) -> Result<DashboardData, Error> {
    let transactions = get_all_transactions(store)?;

    Ok(DashboardData {
        product_count: get_all_products(store)?.len(),
        customer_count: get_all_customers(store)?.len(),
        recent_transactions: most_recent(&transactions, RECENT_TRANSACTIONS),
        transactions,
    })
}

fn stat_cards(data: &DashboardData, summary: &DashboardSummary) -> Markup {
    stat_cards_view(&[
        StatCard {
            title: "Total products",
            value: data.product_count,
            change: None,
        },
        StatCard {
            title: "Total customers",
            value: data.customer_count,
            change: Some(summary.customer_change),
        },
        StatCard {
            title: "Pending transactions",
            value: summary.pending_count,
            change: Some(summary.pending_change),
        },
        StatCard {
            title: "Successful transactions",
            value: summary.success_count,
            change: Some(summary.success_change),
        },
    ])
}

fn dashboard_view(data: &DashboardData, now: OffsetDateTime) -> Markup {
    let summary = summarize(&data.transactions, now);

    let mut charts = vec![DashboardChart {
        id: "sales-chart",
        options: sales_chart(&summary.monthly_sales).to_string(),
    }];

    if !summary.payment_methods.is_empty() {
        charts.push(DashboardChart {
            id: "payment-methods-chart",
            options: payment_methods_chart(&summary.payment_methods).to_string(),
        });
    }

    let content = html!(
        (NavBar::new(endpoints::DASHBOARD_VIEW).into_html())

        div
            id="dashboard-content"
            class="flex flex-col items-center gap-6 px-2 lg:px-6 py-4 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            h1 class="self-start text-2xl font-bold" { "Dashboard" }

            (stat_cards(data, &summary))

            section id="charts" class="w-full grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                (charts_view(&charts))

                @if summary.payment_methods.is_empty() {
                    div
                        id="payment-methods-empty"
                        class="min-h-[360px] flex items-center justify-center rounded
                            border border-dashed border-gray-300 dark:border-gray-600
                            text-gray-500 dark:text-gray-400"
                    {
                        p
                        {
                            "No payment data yet. "
                            (link(endpoints::NEW_TRANSACTION_VIEW, "Record a transaction"))
                            " to see how customers pay."
                        }
                    }
                }
            }

            div class="w-full grid grid-cols-1 xl:grid-cols-3 gap-4"
            {
                (order_summary_view(&summary))

                div class="xl:col-span-2"
                {
                    (recent_transactions_view(&data.recent_transactions, now.offset()))
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}
