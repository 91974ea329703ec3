mod handler;
mod model;

pub use handler::{create_order, list_orders};
