use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Address, Order};
use crate::utils::deserialize_optional_i64;

/// 运费上限 100 万美元
pub const MAX_SHIPPING_COST_CENTS: i64 = 100_000_000;

pub const MISSING_FIELDS: &str =
    "Missing required fields: walletAddress, productId, shippingAddress, transactionHash";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub wallet_address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub product_id: Option<i64>,
    pub shipping_address: Option<Address>,
    /// 美元
    pub shipping_cost: Option<Decimal>,
    pub shipping_method: Option<String>,
    pub selected_rate_id: Option<String>,
    pub transaction_hash: Option<String>,
}

/// 校验通过的下单请求
#[derive(Debug)]
pub struct ValidOrderRequest {
    pub wallet_address: String,
    pub product_id: i64,
    pub shipping_address: Address,
    pub shipping_cost: Decimal,
    pub shipping_method: Option<String>,
    pub selected_rate_id: Option<String>,
    pub transaction_hash: String,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateOrderRequest {
    pub fn validate(self) -> Option<ValidOrderRequest> {
        Some(ValidOrderRequest {
            wallet_address: present(self.wallet_address)?,
            product_id: self.product_id?,
            shipping_address: self.shipping_address?,
            shipping_cost: self.shipping_cost.unwrap_or(Decimal::ZERO),
            shipping_method: present(self.shipping_method),
            selected_rate_id: present(self.selected_rate_id),
            transaction_hash: present(self.transaction_hash)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub wallet_address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedOrder {
    pub id: i64,
    pub order_number: String,
    pub status: String,
    pub product_name: String,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for CreatedOrder {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            status: order.status,
            product_name: order.product_name,
            total_amount: order.total_amount,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order: CreatedOrder,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OrderSummary {
    pub id: i64,
    pub order_number: String,
    pub status: String,
    pub product_name: String,
    pub total_amount: i64,
    pub shipping_method: Option<String>,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            status: order.status,
            product_name: order.product_name,
            total_amount: order.total_amount,
            shipping_method: order.shipping_method,
            tracking_number: order.tracking_number,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListOrdersResponse {
    pub orders: Vec<OrderSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}
