pub mod coinbase_commerce;
pub mod easypost;

pub use coinbase_commerce::{CommerceClient, CommerceError};
pub use easypost::{EasyPostClient, EasyPostError};
