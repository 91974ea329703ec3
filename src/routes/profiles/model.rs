use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Address, ProfileData};

/// Smart Wallet 数据回调请求体
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(default)]
    pub requested_info: RequestedInfo,
    pub calls: Option<Value>,
    pub chain_id: Option<Value>,
    pub version: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedInfo {
    pub email: Option<String>,
    pub physical_address: Option<PhysicalAddressInfo>,
    pub phone_number: Option<Value>,
    pub wallet_address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalAddressInfo {
    pub physical_address: Option<WalletAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub name: Option<Value>,
}

/// 字符串或 `{firstName, familyName}`
fn display_name(value: &Value) -> Option<String> {
    let name = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Object(map) => ["firstName", "familyName"]
            .iter()
            .filter_map(|k| map.get(*k).and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    };
    (!name.is_empty()).then_some(name)
}

/// 字符串或 `{number, country}`
fn phone(value: &Value) -> Option<String> {
    let number = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("number").and_then(Value::as_str)?,
        _ => return None,
    };
    let number = number.trim();
    (!number.is_empty()).then(|| number.to_string())
}

impl From<&WalletAddress> for Address {
    fn from(addr: &WalletAddress) -> Self {
        Self {
            name: addr.name.as_ref().and_then(display_name),
            street1: addr.address1.clone(),
            street2: addr.address2.clone(),
            city: addr.city.clone(),
            state: addr.state.clone(),
            zip: addr.postal_code.clone(),
            country: addr.country_code.clone(),
            ..Default::default()
        }
    }
}

impl RequestedInfo {
    pub fn address(&self) -> Option<&WalletAddress> {
        self.physical_address
            .as_ref()
            .and_then(|p| p.physical_address.as_ref())
    }

    pub fn wallet(&self) -> Option<&str> {
        self.wallet_address
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }

    pub fn profile_data(&self) -> ProfileData {
        let address = self.address();
        ProfileData {
            physical_address: address.map(Address::from),
            phone: self.phone_number.as_ref().and_then(phone),
            name: address.and_then(|a| a.name.as_ref()).and_then(display_name),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassThrough {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calls: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ValidationSuccess {
    pub request: PassThrough,
}

#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CallbackStatus {
    pub message: &'static str,
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}
