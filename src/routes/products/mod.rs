pub mod catalog;
mod handler;
mod model;

pub use handler::{list_products, product_counts};
