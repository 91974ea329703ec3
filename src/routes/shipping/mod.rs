mod handler;
mod model;

pub use handler::{calculate_shipping, test_connection};
