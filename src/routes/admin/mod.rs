mod handler;
mod model;

pub use handler::{
    authenticate,
    create_product,
    delete_product,
    list_orders,
    list_products,
    update_order_shipping,
    update_order_status,
    update_product,
};
