use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

/// 商品分类（封闭枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Tops,
    Bottoms,
    Jumpsuits,
    Footwear,
    Handbags,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Tops,
        Category::Bottoms,
        Category::Jumpsuits,
        Category::Footwear,
        Category::Handbags,
        Category::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tops => "TOPS",
            Category::Bottoms => "BOTTOMS",
            Category::Jumpsuits => "JUMPSUITS",
            Category::Footwear => "FOOTWEAR",
            Category::Handbags => "HANDBAGS",
            Category::Accessories => "ACCESSORIES",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// micro-USDC
    pub price_usdc: i64,
    pub size: Option<String>,
    pub measurements: Option<String>,
    pub category: Option<String>,
    pub images: Vec<String>,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_usdc: i64,
    pub size: Option<String>,
    pub measurements: Option<String>,
    pub category: Option<Category>,
    pub images: Vec<String>,
    pub stock_quantity: i32,
    pub is_active: bool,
}

/// 部分更新：None 表示保留原值
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_usdc: Option<i64>,
    pub size: Option<String>,
    pub measurements: Option<String>,
    pub category: Option<Category>,
    pub images: Option<Vec<String>>,
    pub stock_quantity: Option<i32>,
    pub is_active: Option<bool>,
}

impl Product {
    pub fn category(&self) -> Option<Category> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }

    pub fn is_vintage(&self) -> bool {
        self.name.to_lowercase().contains("vintage")
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE is_active = true
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_active_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 AND is_active = true")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, new: &NewProduct) -> Result<Self, sqlx::Error> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (name, description, price_usdc, size, measurements, category, images, stock_quantity, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price_usdc)
        .bind(&new.size)
        .bind(&new.measurements)
        .bind(new.category.map(|c| c.as_str()))
        .bind(&new.images)
        .bind(new.stock_quantity)
        .bind(new.is_active)
        .fetch_one(pool)
        .await?;

        tracing::info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        changes: &ProductChanges,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price_usdc = COALESCE($4, price_usdc),
                size = COALESCE($5, size),
                measurements = COALESCE($6, measurements),
                category = COALESCE($7, category),
                images = COALESCE($8, images),
                stock_quantity = COALESCE($9, stock_quantity),
                is_active = COALESCE($10, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.price_usdc)
        .bind(&changes.size)
        .bind(&changes.measurements)
        .bind(changes.category.map(|c| c.as_str()))
        .bind(&changes.images)
        .bind(changes.stock_quantity)
        .bind(changes.is_active)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// 扣减一件库存；库存不足时返回 false
    pub async fn take_one(
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - 1, updated_at = NOW()
            WHERE id = $1 AND stock_quantity > 0
            "#,
        )
        .bind(id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
