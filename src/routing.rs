//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    customer::{
        create_customer_endpoint, delete_customer_endpoint, get_customers_page,
        get_edit_customer_page, get_new_customer_page, update_customer_endpoint,
    },
    dashboard::get_dashboard_page,
    endpoints,
    not_found::get_404_not_found,
    product::{
        create_product_endpoint, delete_product_endpoint, get_edit_product_page,
        get_new_product_page, get_products_page, import_products_endpoint,
        update_product_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_edit_transaction_page,
        get_new_transaction_page, get_transactions_page, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::PRODUCTS_VIEW, get(get_products_page))
        .route(endpoints::NEW_PRODUCT_VIEW, get(get_new_product_page))
        .route(endpoints::EDIT_PRODUCT_VIEW, get(get_edit_product_page))
        .route(endpoints::CUSTOMERS_VIEW, get(get_customers_page))
        .route(endpoints::NEW_CUSTOMER_VIEW, get(get_new_customer_page))
        .route(endpoints::EDIT_CUSTOMER_VIEW, get(get_edit_customer_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        );

    // Endpoints called by HTMX, they respond with redirects or alert fragments.
    let api_routes = Router::new()
        .route(endpoints::PRODUCTS_API, post(create_product_endpoint))
        .route(endpoints::IMPORT_PRODUCTS, post(import_products_endpoint))
        .route(
            endpoints::PRODUCT,
            put(update_product_endpoint).delete(delete_product_endpoint),
        )
        .route(endpoints::CUSTOMERS_API, post(create_customer_endpoint))
        .route(
            endpoints::CUSTOMER,
            put(update_customer_endpoint).delete(delete_customer_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        );

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
