//! Orders placed by customers and the pages for managing them.

mod core;
mod create;
mod delete;
mod edit;
mod list;

pub use core::{
    CustomerNameUpdate, NewCustomerDetails, NewTransaction, Transaction, TransactionStatus,
    TransactionUpdate, create_transaction, delete_transaction, get_all_transactions,
    get_transaction, most_recent, sort_newest_first, update_transaction,
};
pub use create::{create_transaction_endpoint, get_new_transaction_page};
pub use delete::delete_transaction_endpoint;
pub use edit::{get_edit_transaction_page, update_transaction_endpoint};
pub use list::{get_transactions_page, status_badge};
