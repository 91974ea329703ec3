mod address;
mod admin_session;
mod order;
mod product;
mod user;

pub use address::Address;
pub use admin_session::AdminSession;
pub use order::{NewOrder, Order, PlaceOrderOutcome, ShippingUpdate};
pub use product::{Category, NewProduct, Product, ProductChanges};
pub use user::{ProfileData, User, UserProfile};
