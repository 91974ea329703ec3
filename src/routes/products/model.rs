use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Product;
use crate::money::format_usdc_whole;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// 店面展示用的商品
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    pub id: String,
    pub name: String,
    pub price: String,
    pub price_in_wei: String,
    pub images: Vec<String>,
    pub description: String,
    pub size: String,
    pub measurements: String,
    pub category: String,
}

impl From<&Product> for ProductItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: format_usdc_whole(product.price_usdc),
            price_in_wei: product.price_usdc.to_string(),
            images: product.images.clone(),
            description: product.description.clone().unwrap_or_default(),
            size: product.size.clone().unwrap_or_default(),
            measurements: product.measurements.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsResponse {
    pub products: Vec<ProductItem>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Serialize)]
pub struct ProductCountsResponse {
    pub counts: BTreeMap<&'static str, usize>,
}
