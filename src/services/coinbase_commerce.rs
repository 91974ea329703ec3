//! Coinbase Commerce hosted-charge client.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum CommerceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Coinbase Commerce API error: {status}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalPrice {
    pub amount: String,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChargeRequest {
    pub local_price: LocalPrice,
    pub pricing_type: &'static str,
    pub name: String,
    pub description: String,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone)]
pub struct CommerceClient {
    client: reqwest::Client,
    base_url: String,
}

impl CommerceClient {
    pub fn new(config: &Config) -> Result<Self, CommerceError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-CC-Api-Key",
            HeaderValue::from_str(&config.coinbase_commerce_api_key)
                .map_err(|e| CommerceError::Parse(format!("Invalid API key format: {e}")))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config
                .coinbase_commerce_base_url
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// 创建托管收款单，返回 charge 对象
    pub async fn create_charge(
        &self,
        charge: &ChargeRequest,
    ) -> Result<serde_json::Value, CommerceError> {
        let url = format!("{}/charges", self.base_url);
        let response = self.client.post(&url).json(charge).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!("Coinbase Commerce API error: {} {}", status, message);
            return Err(CommerceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CommerceError::Parse(e.to_string()))?;

        // 接口把收款单包在 data 字段中
        if body.get("data").is_some_and(|d| d.is_object()) {
            return Ok(body["data"].take());
        }
        Ok(body)
    }
}
