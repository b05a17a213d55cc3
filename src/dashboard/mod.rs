//! The dashboard: headline numbers, sales charts and the latest orders.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
