pub mod admin;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod shipping;
