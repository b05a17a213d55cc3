//! The product catalog and the pages for managing it.

mod core;
mod create;
mod delete;
mod edit;
mod form;
mod import;
mod list;

pub use core::{
    Gender, Product, ProductName, create_product, delete_product, get_all_products, get_product,
    update_product,
};
pub use create::{create_product_endpoint, get_new_product_page};
pub use delete::delete_product_endpoint;
pub use edit::{get_edit_product_page, update_product_endpoint};
pub use import::import_products_endpoint;
pub use list::get_products_page;
