use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Category, NewProduct, Order, Product, ProductChanges, ShippingUpdate};
use crate::money::MAX_PRICE_MICRO;
use crate::utils::deserialize_optional_i64;

#[derive(Debug, Deserialize)]
pub struct AdminAuthRequest {
    #[serde(rename = "walletAddress", alias = "wallet_address")]
    pub wallet_address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAuthResponse {
    pub session_token: String,
    pub wallet_address: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
    pub message: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub price_usdc: Option<i64>,
    pub size: Option<String>,
    pub measurements: Option<String>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub stock_quantity: Option<i64>,
    pub is_active: Option<bool>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_category(raw: Option<String>) -> Result<Option<Category>, AppError> {
    non_blank(raw)
        .map(|c| c.parse::<Category>().map_err(AppError::bad_request))
        .transpose()
}

fn parse_stock(raw: Option<i64>) -> Result<Option<i32>, AppError> {
    raw.map(|stock| {
        if stock < 0 {
            return Err(AppError::bad_request("Stock quantity cannot be negative"));
        }
        i32::try_from(stock).map_err(|_| AppError::bad_request("Stock quantity is too large"))
    })
    .transpose()
}

fn check_price_cap(price_usdc: i64) -> Result<(), AppError> {
    if price_usdc > MAX_PRICE_MICRO {
        return Err(AppError::bad_request("Price is too large"));
    }
    Ok(())
}

impl ProductPayload {
    pub fn into_new_product(self) -> Result<NewProduct, AppError> {
        let name = non_blank(self.name);
        let price_usdc = self.price_usdc.filter(|p| *p != 0);
        let (Some(name), Some(price_usdc)) = (name, price_usdc) else {
            return Err(AppError::bad_request("Name and price are required"));
        };
        if price_usdc < 0 {
            return Err(AppError::bad_request("Price cannot be negative"));
        }
        check_price_cap(price_usdc)?;

        Ok(NewProduct {
            name,
            description: self.description,
            price_usdc,
            size: self.size,
            measurements: self.measurements,
            category: parse_category(self.category)?,
            images: self.images.unwrap_or_default(),
            stock_quantity: parse_stock(self.stock_quantity)?.unwrap_or(0),
            is_active: self.is_active.unwrap_or(true),
        })
    }

    /// 返回商品 id 与需要修改的字段
    pub fn into_changes(self) -> Result<(i64, ProductChanges), AppError> {
        let id = self
            .id
            .ok_or_else(|| AppError::bad_request("Product id is required"))?;

        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::bad_request("Name cannot be empty"));
        }
        if self.price_usdc.is_some_and(|p| p <= 0) {
            return Err(AppError::bad_request("Price must be greater than zero"));
        }
        if let Some(price) = self.price_usdc {
            check_price_cap(price)?;
        }

        Ok((
            id,
            ProductChanges {
                name: non_blank(self.name),
                description: self.description,
                price_usdc: self.price_usdc,
                size: self.size,
                measurements: self.measurements,
                category: parse_category(self.category)?,
                images: self.images,
                stock_quantity: parse_stock(self.stock_quantity)?,
                is_active: self.is_active,
            },
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderShippingRequest {
    pub easypost_shipment_id: Option<String>,
    pub easypost_rate_id: Option<String>,
    pub tracking_number: Option<String>,
}

impl From<UpdateOrderShippingRequest> for ShippingUpdate {
    fn from(req: UpdateOrderShippingRequest) -> Self {
        Self {
            easypost_shipment_id: non_blank(req.easypost_shipment_id),
            easypost_rate_id: non_blank(req.easypost_rate_id),
            tracking_number: non_blank(req.tracking_number),
        }
    }
}
