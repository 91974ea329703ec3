use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ShipFrom;
use crate::models::Address;
use crate::services::easypost::{CarrierRate, EasyPostAddress};

pub const DEFAULT_WEIGHT_OZ: f64 = 8.0;
const DEFAULT_STREET: &str = "123 Customer St";
const DEFAULT_COUNTRY: &str = "US";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateShippingRequest {
    /// 原样回显给客户端
    pub to_address: Option<serde_json::Value>,
    /// 盎司
    pub weight: Option<f64>,
}

impl From<&ShipFrom> for EasyPostAddress {
    fn from(from: &ShipFrom) -> Self {
        Self {
            street1: from.street1.clone(),
            street2: None,
            city: from.city.clone(),
            state: from.state.clone(),
            zip: from.zip.clone(),
            country: from.country.clone(),
        }
    }
}

/// 收货地址缺少邮编时返回 None
pub fn destination(address: &Address) -> Option<EasyPostAddress> {
    let zip = address.zip()?;
    Some(EasyPostAddress {
        street1: address.street1().unwrap_or(DEFAULT_STREET).to_string(),
        street2: address.street2().map(str::to_string),
        city: address.city().unwrap_or_default().to_string(),
        state: address.state().unwrap_or_default().to_string(),
        zip: zip.to_string(),
        country: address.country().unwrap_or(DEFAULT_COUNTRY).to_string(),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ShippingRate {
    pub id: String,
    pub service: String,
    pub carrier: String,
    /// 美元；承运商返回无法解析的金额时为 null
    pub rate: Option<f64>,
    pub delivery_days: Option<i64>,
    pub delivery_date: Option<String>,
    pub description: String,
}

impl From<CarrierRate> for ShippingRate {
    fn from(rate: CarrierRate) -> Self {
        let description = match rate.delivery_days {
            Some(days) if days > 0 => {
                format!("{} {} ({} days)", rate.carrier, rate.service, days)
            }
            _ => format!("{} {}", rate.carrier, rate.service),
        };

        Self {
            rate: rate.rate.trim().parse::<f64>().ok().filter(|r| r.is_finite()),
            id: rate.id,
            service: rate.service,
            carrier: rate.carrier,
            delivery_days: rate.delivery_days,
            delivery_date: rate.delivery_date,
            description,
        }
    }
}

/// 按价格升序排列，无法解析的排在最后
pub fn sorted_rates(rates: Vec<CarrierRate>) -> Vec<ShippingRate> {
    let mut rates: Vec<ShippingRate> = rates.into_iter().map(ShippingRate::from).collect();
    rates.sort_by(|a, b| match (a.rate, b.rate) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rates
}

#[derive(Debug, Serialize)]
pub struct CalculateShippingResponse {
    pub rates: Vec<ShippingRate>,
    pub shipment_id: String,
    pub from_address: ShipFrom,
    pub to_address: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct ConnectionTestResponse {
    pub message: &'static str,
    pub test_address: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}
