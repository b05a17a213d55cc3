//! The customers page.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    customer::{Customer, get_all_customers},
    endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links,
    },
    navigation::NavBar,
    store::DocumentStore,
};

/// The state needed for the customers page.
#[derive(Debug, Clone)]
pub struct CustomersPageState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for CustomersPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Render every customer in alphabetical order.
pub async fn get_customers_page(
    State(state): State<CustomersPageState>,
) -> Result<Response, Error> {
    let mut customers = get_all_customers(state.store.as_ref())
        .inspect_err(|error| tracing::error!("Failed to retrieve customers: {error}"))?;
    customers.sort_by_cached_key(|customer| customer.name.to_lowercase());

    let content = html! {
        (NavBar::new(endpoints::CUSTOMERS_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Customers" }

                    a href=(endpoints::NEW_CUSTOMER_VIEW) class=(LINK_STYLE) { "Add Customer" }
                }

                (customer_cards_view(&customers))
                (customers_table_view(&customers))
            }
        }
    };

    Ok(base("Customers", &[], &content).into_response())
}

fn action_links(customer: &Customer) -> Markup {
    let id = customer.id.as_ref();

    edit_delete_action_links(
        &endpoints::format_endpoint(endpoints::EDIT_CUSTOMER_VIEW, id),
        &endpoints::format_endpoint(endpoints::CUSTOMER, id),
        &format!(
            "Are you sure you want to delete '{}'? Their transactions will be kept.",
            customer.name
        ),
        "closest [data-customer-row]",
        "delete",
    )
}

fn avatar(customer: &Customer) -> Markup {
    html! {
        @if customer.image_url.is_empty() {
            div class="size-12 rounded-full bg-gray-200 dark:bg-gray-700" {}
        } @else {
            img src=(customer.image_url) alt=(customer.name) class="size-12 rounded-full object-cover";
        }
    }
}

fn customers_table_view(customers: &[Customer]) -> Markup {
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
                        th scope="col" class=(TABLE_CELL_STYLE) { "Image" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Phone" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Address" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for (row_number, customer) in (1..).zip(customers) {
                        tr class=(TABLE_ROW_STYLE) data-customer-row="true"
                        {
                            td class=(TABLE_CELL_STYLE) { (row_number) }
                            td class=(TABLE_CELL_STYLE) { (avatar(customer)) }
                            td class={ (TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white" }
                            {
                                (customer.name)
                            }
                            td class=(TABLE_CELL_STYLE) { (customer.phone) }
                            td class=(TABLE_CELL_STYLE) { (customer.address) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                div class="flex gap-4" { (action_links(customer)) }
                            }
                        }
                    }

                    @if customers.is_empty() {
                        tr
                        {
                            td
                                colspan="6"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No customers found."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn customer_cards_view(customers: &[Customer]) -> Markup {
    html! {
        ul class="lg:hidden space-y-4"
        {
            @for customer in customers {
                li
                    class="flex gap-3 items-center rounded border border-gray-200 bg-white px-4 py-3
                        shadow-sm dark:border-gray-700 dark:bg-gray-800"
                    data-customer-row="true"
                {
                    (avatar(customer))

                    div class="flex-1 min-w-0"
                    {
                        p class="font-semibold truncate" { (customer.name) }
                        p class="text-xs text-gray-500 dark:text-gray-400"
                        {
                            (customer.phone)
                            @if !customer.address.is_empty() {
                                " · " (customer.address)
                            }
                        }
                        div class="mt-2 flex items-center gap-4 text-sm" { (action_links(customer)) }
                    }
                }
            }

            @if customers.is_empty() {
                li class="text-center text-gray-500 dark:text-gray-400" { "No customers found." }
            }
        }
    }
}
