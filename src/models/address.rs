use serde::{Deserialize, Serialize};

/// 收货地址；兼容前端、承运商与钱包三种字段命名
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_area_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Address {
    pub fn street1(&self) -> Option<&str> {
        present(&self.street1).or_else(|| present(&self.line1))
    }

    pub fn street2(&self) -> Option<&str> {
        present(&self.street2).or_else(|| present(&self.line2))
    }

    pub fn city(&self) -> Option<&str> {
        present(&self.city)
    }

    pub fn state(&self) -> Option<&str> {
        present(&self.state).or_else(|| present(&self.admin_area_1))
    }

    pub fn zip(&self) -> Option<&str> {
        present(&self.zip).or_else(|| present(&self.postal_code))
    }

    pub fn country(&self) -> Option<&str> {
        present(&self.country)
    }
}
