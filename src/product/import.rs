//! Bulk product import from a pasted JSON array or an uploaded `.json` file.
//!
//! The whole input is validated before anything is written. Products are then
//! written one at a time, so a store failure partway through leaves the
//! products written so far in place.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde_json::Value;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    product::{Product, create_product},
    store::{Document, DocumentStore},
};

/// The name of the textarea for pasted JSON.
const TEXT_FIELD: &str = "json";
/// The name of the file input.
const FILE_FIELD: &str = "file";

/// The state needed for importing products.
#[derive(Debug, Clone)]
pub struct ImportProductsState {
    pub store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for ImportProductsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Route handler for importing many products at once.
///
/// Accepts a multipart form with pasted JSON in the `json` field and/or a
/// `.json` file in the `file` field. When both are given the file is used.
pub async fn import_products_endpoint(
    State(state): State<ImportProductsState>,
    mut multipart: Multipart,
) -> Response {
    let start_time = std::time::Instant::now();

    let input = match read_import_input(&mut multipart).await {
        Ok(input) => input,
        Err(error) => {
            tracing::debug!("Could not read product import: {error}");
            return error.into_alert_response();
        }
    };

    let products = match parse_products(&input) {
        Ok(products) => products,
        Err(error) => {
            tracing::debug!("Rejected product import: {error}");
            return error.into_alert_response();
        }
    };

    match import_products(&products, OffsetDateTime::now_utc(), state.store.as_ref()) {
        Ok(count) => {
            tracing::info!(
                "Imported {count} products in {}ms",
                start_time.elapsed().as_millis()
            );

            (
                StatusCode::CREATED,
                Alert::Success {
                    message: "Import completed successfully!".to_owned(),
                    details: format!("Imported {count} products."),
                }
                .into_html(),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Failed to import products: {error}");
            error.into_alert_response()
        }
    }
}

/// The bulk import form.
pub fn import_form_view() -> Markup {
    html! {
        form
            hx-post=(endpoints::IMPORT_PRODUCTS)
            hx-encoding="multipart/form-data"
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for=(TEXT_FIELD) class=(FORM_LABEL_STYLE)
                {
                    "Paste a JSON array of products"
                }
                textarea
                    id=(TEXT_FIELD)
                    name=(TEXT_FIELD)
                    rows="6"
                    placeholder=r#"[{"name": "Linen Shirt", "price": 250000}]"#
                    class=(FORM_TEXT_INPUT_STYLE)
                {}
            }

            div
            {
                label for=(FILE_FIELD) class=(FORM_LABEL_STYLE) { "Or upload a .json file" }
                input
                    id=(FILE_FIELD)
                    type="file"
                    name=(FILE_FIELD)
                    accept=".json,application/json"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Import Products" }
        }
    }
}

async fn read_import_input(multipart: &mut Multipart) -> Result<String, Error> {
    let mut pasted = String::new();
    let mut uploaded = None;

    while let Some(field) = multipart.next_field().await.map_err(|error| {
        tracing::error!("Could not read multipart form field: {error}");
        Error::MultipartError(error.body_text())
    })? {
        let name = field.name().unwrap_or_default().to_owned();

        match name.as_str() {
            TEXT_FIELD => pasted = read_field_text(field).await?,
            FILE_FIELD => {
                if let Some(data) = read_uploaded_file(field).await? {
                    uploaded = Some(data);
                }
            }
            _ => tracing::debug!("Ignoring unexpected multipart field {name:?}"),
        }
    }

    Ok(uploaded.unwrap_or(pasted))
}

/// Returns `None` when the file input was left empty.
async fn read_uploaded_file(field: Field<'_>) -> Result<Option<String>, Error> {
    let file_name = field.file_name().unwrap_or_default().to_owned();

    if file_name.is_empty() {
        return Ok(None);
    }

    if !file_name.to_lowercase().ends_with(".json") {
        return Err(Error::InvalidImport(format!(
            "The file \"{file_name}\" is not a .json file"
        )));
    }

    let data = read_field_text(field).await?;
    tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

    Ok(Some(data))
}

async fn read_field_text(field: Field<'_>) -> Result<String, Error> {
    field.text().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })
}

/// Parse import input into products.
///
/// # Errors
///
/// Returns [Error::InvalidImport] if the input is not a non-empty JSON array
/// of objects that each have a name.
fn parse_products(input: &str) -> Result<Vec<Product>, Error> {
    let input = input.trim();

    if input.is_empty() {
        return Err(Error::InvalidImport("No product data was provided".to_owned()));
    }

    let value: Value = serde_json::from_str(input)
        .map_err(|error| Error::InvalidImport(format!("The input is not valid JSON ({error})")))?;

    let Value::Array(items) = value else {
        return Err(Error::InvalidImport(
            "The input must be a JSON array of products".to_owned(),
        ));
    };

    if items.is_empty() {
        return Err(Error::InvalidImport(
            "The input does not contain any products".to_owned(),
        ));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let position = index + 1;

            let Value::Object(fields) = item else {
                return Err(Error::InvalidImport(format!(
                    "Item {position} is not a product object"
                )));
            };

            let product: Product = Document {
                id: Default::default(),
                fields,
            }
            .decode();

            if product.name.is_empty() {
                return Err(Error::InvalidImport(format!(
                    "Product {position} does not have a name"
                )));
            }

            Ok(product)
        })
        .collect()
}

/// Write `products` one at a time, stamping each with `now`.
///
/// # Errors
///
/// Returns [Error::IncompleteImport] with the number of products written if
/// the store fails partway through.
fn import_products(
    products: &[Product],
    now: OffsetDateTime,
    store: &dyn DocumentStore,
) -> Result<usize, Error> {
    for (created, product) in products.iter().enumerate() {
        let product = Product {
            created_at: Some(now),
            ..product.clone()
        };

        if let Err(error) = create_product(&product, store) {
            tracing::error!("Could not import product {}: {error}", product.name);

            return Err(Error::IncompleteImport {
                created,
                total: products.len(),
            });
        }
    }

    Ok(products.len())
}
