//! EasyPost REST client for shipment rating and address creation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum EasyPostError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("EasyPost API error: {status} - {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl EasyPostError {
    /// 承运商拒绝地址时错误信息中会提到 address
    pub fn mentions_address(&self) -> bool {
        match self {
            EasyPostError::Api { code, message, .. } => {
                message.to_lowercase().contains("address")
                    || code
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains("address"))
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EasyPostAddress {
    pub street1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// 尺寸单位英寸，重量单位盎司
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parcel {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

impl Parcel {
    /// 标准服装包裹 12x10x3
    pub fn clothing(weight_oz: f64) -> Self {
        Self {
            length: 12.0,
            width: 10.0,
            height: 3.0,
            weight: weight_oz,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipmentRequest {
    pub to_address: EasyPostAddress,
    pub from_address: EasyPostAddress,
    pub parcel: Parcel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Shipment {
    pub id: String,
    #[serde(default)]
    pub rates: Vec<CarrierRate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarrierRate {
    pub id: String,
    pub service: String,
    pub carrier: String,
    /// 美元金额字符串，例如 "7.58"
    pub rate: String,
    pub delivery_days: Option<i64>,
    pub delivery_date: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: String,
}

#[derive(Clone)]
pub struct EasyPostClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EasyPostClient {
    pub fn new(config: &Config) -> Result<Self, EasyPostError> {
        if config.easypost_api_key.is_empty() {
            tracing::warn!("EASYPOST_API_KEY is not set, shipping rates will fail");
        }

        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: config.easypost_base_url.trim_end_matches('/').to_string(),
            api_key: config.easypost_api_key.clone(),
        })
    }

    pub async fn create_shipment(
        &self,
        shipment: &ShipmentRequest,
    ) -> Result<Shipment, EasyPostError> {
        let url = format!("{}/shipments", self.base_url);
        let body = serde_json::json!({ "shipment": shipment });

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(""))
            .json(&body)
            .send()
            .await?;

        Self::read_json(response).await
    }

    pub async fn create_address(
        &self,
        address: &EasyPostAddress,
    ) -> Result<serde_json::Value, EasyPostError> {
        let url = format!("{}/addresses", self.base_url);
        let body = serde_json::json!({ "address": address });

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(""))
            .json(&body)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, EasyPostError> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let (code, message) = match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => (envelope.error.code, envelope.error.message),
                Err(_) => (None, text),
            };
            return Err(EasyPostError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| EasyPostError::Parse(e.to_string()))
    }
}
