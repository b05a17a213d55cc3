//! The products page.

use std::{cmp::Reverse, sync::Arc};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        TAG_BADGE_STYLE, base, edit_delete_action_links, format_currency, truncate_text,
    },
    navigation::NavBar,
    product::{Product, get_all_products},
    store::DocumentStore,
};

/// Descriptions longer than this are cut short in the table.
const DESCRIPTION_PREVIEW_LENGTH: usize = 60;

/// The state needed for the products page.
#[derive(Debug, Clone)]
pub struct ProductsPageState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for ProductsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Render every product, newest first.
pub async fn get_products_page(State(state): State<ProductsPageState>) -> Result<Response, Error> {
    let mut products = get_all_products(state.store.as_ref())
        .inspect_err(|error| tracing::error!("Failed to retrieve products: {error}"))?;
    products.sort_by_key(|product| Reverse(product.created_at));

    let content = html! {
        (NavBar::new(endpoints::PRODUCTS_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-6xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Products" }

                    a href=(endpoints::NEW_PRODUCT_VIEW) class=(LINK_STYLE) { "Add Product" }
                }

                (product_cards_view(&products))
                (products_table_view(&products))
            }
        }
    };

    Ok(base("Products", &[], &content).into_response())
}

fn action_links(product: &Product) -> Markup {
    let id = product.id.as_ref();

    edit_delete_action_links(
        &endpoints::format_endpoint(endpoints::EDIT_PRODUCT_VIEW, id),
        &endpoints::format_endpoint(endpoints::PRODUCT, id),
        &format!(
            "Are you sure you want to delete '{}'? This cannot be undone.",
            product.name
        ),
        "closest [data-product-row]",
        "delete",
    )
}

fn product_image(product: &Product, size_style: &str) -> Markup {
    html! {
        @match product.images.first() {
            Some(url) => {
                img src=(url) alt=(product.name) class={ "rounded object-cover " (size_style) };
            }
            None => {
                div class={ "rounded bg-gray-200 dark:bg-gray-700 " (size_style) } {}
            }
        }
    }
}

fn tag_badges(values: &[String]) -> Markup {
    html! {
        @if !values.is_empty() {
            div class="flex flex-wrap gap-1 mt-1"
            {
                @for value in values {
                    span class=(TAG_BADGE_STYLE) { (value) }
                }
            }
        }
    }
}

fn products_table_view(products: &[Product]) -> Markup {
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
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Stock" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for (row_number, product) in (1..).zip(products) {
                        tr class=(TABLE_ROW_STYLE) data-product-row="true"
                        {
                            td class=(TABLE_CELL_STYLE) { (row_number) }
                            td class=(TABLE_CELL_STYLE) { (product_image(product, "w-12 h-12")) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                p class="font-medium text-gray-900 dark:text-white" { (product.name) }

                                @if !product.description.is_empty() {
                                    p class="text-xs"
                                    {
                                        (truncate_text(&product.description, DESCRIPTION_PREVIEW_LENGTH))
                                    }
                                }

                                (tag_badges(&product.sizes))
                            }
                            td class=(TABLE_CELL_STYLE) { (product.category_id) }
                            td class={ (TABLE_CELL_STYLE) " tabular-nums text-right" }
                            {
                                (format_currency(product.price))
                            }
                            td class={ (TABLE_CELL_STYLE) " tabular-nums text-right" } { (product.stock) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                div class="flex gap-4" { (action_links(product)) }
                            }
                        }
                    }

                    @if products.is_empty() {
                        tr
                        {
                            td
                                colspan="7"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No products found."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn product_cards_view(products: &[Product]) -> Markup {
    html! {
        ul class="lg:hidden space-y-4"
        {
            @for product in products {
                li
                    class="flex gap-3 rounded border border-gray-200 bg-white px-4 py-3 shadow-sm
                        dark:border-gray-700 dark:bg-gray-800"
                    data-product-row="true"
                {
                    (product_image(product, "w-16 h-16 shrink-0"))

                    div class="flex-1 min-w-0"
                    {
                        div class="flex items-start justify-between gap-3"
                        {
                            p class="font-semibold truncate" { (product.name) }
                            span class="text-sm tabular-nums text-gray-900 dark:text-white"
                            {
                                (format_currency(product.price))
                            }
                        }

                        p class="text-xs text-gray-500 dark:text-gray-400"
                        {
                            "Stock: " (product.stock)
                        }

                        div class="mt-2 flex items-center gap-4 text-sm" { (action_links(product)) }
                    }
                }
            }

            @if products.is_empty() {
                li class="text-center text-gray-500 dark:text-gray-400" { "No products found." }
            }
        }
    }
}
