use config::Config;
use services::{CommerceClient, EasyPostClient};
use sqlx::PgPool;

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod money;
pub mod result;
pub mod router;
pub mod routes;
pub mod services;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub easypost: EasyPostClient,
    pub commerce: CommerceClient,
}
