//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/products/{product_id}/edit', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with sales statistics.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for listing all products.
pub const PRODUCTS_VIEW: &str = "/products";
/// The page for creating or importing products.
pub const NEW_PRODUCT_VIEW: &str = "/products/new";
/// The page for editing an existing product.
pub const EDIT_PRODUCT_VIEW: &str = "/products/{product_id}/edit";
/// The page for listing all customers.
pub const CUSTOMERS_VIEW: &str = "/customers";
/// The page for creating a new customer.
pub const NEW_CUSTOMER_VIEW: &str = "/customers/new";
/// The page for editing an existing customer.
pub const EDIT_CUSTOMER_VIEW: &str = "/customers/{customer_id}/edit";
/// The page for displaying transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a product.
pub const PRODUCTS_API: &str = "/api/products";
/// The route to update or delete a product.
pub const PRODUCT: &str = "/api/products/{product_id}";
/// The route to import a batch of products from JSON.
pub const IMPORT_PRODUCTS: &str = "/api/products/import";
/// The route to create a customer.
pub const CUSTOMERS_API: &str = "/api/customers";
/// The route to update or delete a customer.
pub const CUSTOMER: &str = "/api/customers/{customer_id}";
/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/products/{product_id}', '{product_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::PRODUCTS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_PRODUCT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_PRODUCT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CUSTOMERS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_CUSTOMER_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_CUSTOMER_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::PRODUCTS_API);
        assert_endpoint_is_valid_uri(endpoints::PRODUCT);
        assert_endpoint_is_valid_uri(endpoints::IMPORT_PRODUCTS);
        assert_endpoint_is_valid_uri(endpoints::CUSTOMERS_API);
        assert_endpoint_is_valid_uri(endpoints::CUSTOMER);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", "a1b2");

        assert_eq!(formatted_path, "/hello/a1b2");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", "a1b2");

        assert_eq!(formatted_path, "/hello/a1b2");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", "a1b2");

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint(endpoints::EDIT_PRODUCT_VIEW, "a1b2");

        assert_eq!(formatted_path, "/products/a1b2/edit");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
