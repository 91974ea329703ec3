use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::money::charge_amount;
use crate::services::coinbase_commerce::{ChargeRequest, LocalPrice};
use crate::utils::deserialize_optional_i64;

const DEFAULT_CURRENCY: &str = "USDC";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChargeRequest {
    /// 原样写入 metadata，数字或字符串均可
    #[serde(default)]
    pub product_id: Value,
    pub product_name: Option<String>,
    /// micro-USDC
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub amount: Option<i64>,
    pub currency: Option<String>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl CreateChargeRequest {
    pub fn into_charge(self, store_name: &str, source: &str) -> Result<ChargeRequest, AppError> {
        let name = self
            .product_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::bad_request("Product name is required"))?;
        let amount = self
            .amount
            .filter(|a| *a > 0)
            .ok_or_else(|| AppError::bad_request("A positive amount is required"))?;

        let mut metadata = self.metadata.unwrap_or_default();
        metadata.insert("source".into(), Value::String(source.to_string()));
        metadata.insert("productId".into(), self.product_id);

        Ok(ChargeRequest {
            local_price: LocalPrice {
                amount: charge_amount(amount),
                currency: self
                    .currency
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            },
            pricing_type: "fixed_price",
            description: format!("{} - {}", store_name, name),
            name,
            metadata,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateChargeResponse {
    pub id: Value,
    pub charge: Value,
}
