use std::env;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

const DEFAULT_ADMIN_WALLET: &str = "0x9474FCc86224b8c614eEe0096B4bEcFeF244DaF2";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// 发货地址
#[derive(Debug, Clone, Serialize)]
pub struct ShipFrom {
    pub street1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
    pub admin_wallet_address: String,
    pub admin_session_expiration_secs: u64,
    pub easypost_api_key: String,
    pub easypost_base_url: String,
    pub coinbase_commerce_api_key: String,
    pub coinbase_commerce_base_url: String,
    pub store_name: String,
    pub store_source_tag: String,
    pub ship_from: ShipFrom,
    pub expose_error_details: bool,
}

fn required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn optional(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar(key.to_string(), raw)),
        Err(_) => Ok(default),
    }
}

/// 解析 "24h" / "90m" / "3600" 形式的时长，返回秒数
fn parse_duration_secs(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Some(hours) = raw.strip_suffix('h') {
        return hours.parse::<u64>().ok()?.checked_mul(3600);
    }
    if let Some(minutes) = raw.strip_suffix('m') {
        return minutes.parse::<u64>().ok()?.checked_mul(60);
    }
    raw.trim_end_matches('s').parse().ok()
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let session_raw = optional("ADMIN_SESSION_EXPIRATION", "24h");
        let admin_session_expiration_secs = parse_duration_secs(&session_raw).ok_or_else(|| {
            ConfigError::InvalidEnvVar("ADMIN_SESSION_EXPIRATION".into(), session_raw.clone())
        })?;

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: parsed("SERVER_PORT", 3000)?,
            api_base_uri: optional("API_BASE_URI", "/api"),
            rate_limit_window_secs: parsed("RATE_LIMIT_WINDOW", 60)?,
            rate_limit_requests: parsed("RATE_LIMIT_REQUESTS", 100)?,
            admin_wallet_address: optional("ADMIN_WALLET_ADDRESS", DEFAULT_ADMIN_WALLET),
            admin_session_expiration_secs,
            easypost_api_key: optional("EASYPOST_API_KEY", ""),
            easypost_base_url: optional("EASYPOST_BASE_URL", "https://api.easypost.com/v2"),
            coinbase_commerce_api_key: optional("COINBASE_COMMERCE_API_KEY", ""),
            coinbase_commerce_base_url: optional(
                "COINBASE_COMMERCE_BASE_URL",
                "https://api.commerce.coinbase.com",
            ),
            store_name: optional("STORE_NAME", "Gutter Fairy"),
            store_source_tag: optional("STORE_SOURCE_TAG", "gutter-fairy-website"),
            ship_from: ShipFrom {
                street1: optional("SHIP_FROM_STREET1", "123 Main St"),
                city: optional("SHIP_FROM_CITY", "San Francisco"),
                state: optional("SHIP_FROM_STATE", "CA"),
                zip: optional("SHIP_FROM_ZIP", "94105"),
                country: optional("SHIP_FROM_COUNTRY", "US"),
            },
            expose_error_details: parsed("EXPOSE_ERROR_DETAILS", false)?,
        })
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn admin_session_expiration(&self) -> Duration {
        Duration::from_secs(self.admin_session_expiration_secs)
    }

    /// 开发模式下才向客户端暴露错误细节
    pub fn error_details(&self, err: &impl std::fmt::Display) -> Option<String> {
        self.expose_error_details.then(|| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_durations() {
        assert_eq!(parse_duration_secs("24h"), Some(86_400));
        assert_eq!(parse_duration_secs("90m"), Some(5_400));
        assert_eq!(parse_duration_secs("3600"), Some(3_600));
        assert_eq!(parse_duration_secs("45s"), Some(45));
        assert_eq!(parse_duration_secs("soon"), None);
        assert_eq!(parse_duration_secs("18446744073709551615h"), None);
        assert_eq!(parse_duration_secs("18446744073709551615m"), None);
    }
}
