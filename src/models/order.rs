use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::address::Address;
use super::product::Product;
use crate::utils::generate_order_number;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub order_number: String,
    pub status: String,
    pub product_id: i64,
    pub product_name: String,
    /// 美分
    pub product_price: i64,
    pub shipping_address: Option<Json<Address>>,
    pub shipping_cost: Option<i64>,
    pub shipping_method: Option<String>,
    pub tracking_number: Option<String>,
    pub total_amount: i64,
    pub transaction_hash: Option<String>,
    pub easypost_shipment_id: Option<String>,
    pub easypost_rate_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_price: i64,
    pub shipping_address: Address,
    pub shipping_cost: i64,
    pub shipping_method: Option<String>,
    pub easypost_rate_id: Option<String>,
    pub transaction_hash: String,
}

impl NewOrder {
    /// 溢出时返回 None
    pub fn total_amount(&self) -> Option<i64> {
        self.product_price.checked_add(self.shipping_cost)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShippingUpdate {
    pub easypost_shipment_id: Option<String>,
    pub easypost_rate_id: Option<String>,
    pub tracking_number: Option<String>,
}

#[derive(Debug)]
pub enum PlaceOrderOutcome {
    Placed(Order),
    OutOfStock,
}

impl Order {
    /// 下单与扣减库存在同一事务中完成
    pub async fn place(pool: &PgPool, new: NewOrder) -> Result<PlaceOrderOutcome, sqlx::Error> {
        let total_amount = new
            .total_amount()
            .ok_or_else(|| sqlx::Error::Protocol("Order total overflows".into()))?;

        let mut tx = pool.begin().await?;

        if !Product::take_one(&mut tx, new.product_id).await? {
            tx.rollback().await?;
            return Ok(PlaceOrderOutcome::OutOfStock);
        }

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                user_id, order_number, product_id, product_name, product_price,
                shipping_address, shipping_cost, shipping_method, total_amount,
                transaction_hash, easypost_rate_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(new.user_id)
        .bind(generate_order_number())
        .bind(new.product_id)
        .bind(&new.product_name)
        .bind(new.product_price)
        .bind(Json(&new.shipping_address))
        .bind(new.shipping_cost)
        .bind(&new.shipping_method)
        .bind(total_amount)
        .bind(&new.transaction_hash)
        .bind(&new.easypost_rate_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(PlaceOrderOutcome::Placed(order))
    }

    pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    /// 更新状态并追加状态历史
    pub async fn update_status(
        pool: &PgPool,
        id: i64,
        status: &str,
        notes: Option<&str>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(order) = order else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO order_status_history (order_id, status, notes) VALUES ($1, $2, $3)",
        )
        .bind(id)
        .bind(status)
        .bind(notes)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(order))
    }

    pub async fn update_shipping(
        pool: &PgPool,
        id: i64,
        update: &ShippingUpdate,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders SET
                easypost_shipment_id = COALESCE($2, easypost_shipment_id),
                easypost_rate_id = COALESCE($3, easypost_rate_id),
                tracking_number = COALESCE($4, tracking_number),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.easypost_shipment_id)
        .bind(&update.easypost_rate_id)
        .bind(&update.tracking_number)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewProduct, User};
    use crate::money::{dollars_to_cents, usdc_to_cents};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn new_order(product_price: i64, shipping_cost: i64) -> NewOrder {
        NewOrder {
            user_id: 1,
            product_id: 2,
            product_name: "VINTAGE JACKET".into(),
            product_price,
            shipping_address: Address::default(),
            shipping_cost,
            shipping_method: Some("USPS Priority".into()),
            easypost_rate_id: None,
            transaction_hash: "0xabc".into(),
        }
    }

    #[test]
    fn total_is_product_plus_shipping() {
        assert_eq!(new_order(4_500, 758).total_amount(), Some(5_258));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let shipping = dollars_to_cents(Decimal::from_str("92233720368547758.07").unwrap()).unwrap();
        assert_eq!(shipping, i64::MAX);
        assert_eq!(
            new_order(usdc_to_cents(45_000_000), shipping).total_amount(),
            None
        );
    }

    /// 插入一件库存为 stock 的商品和一个买家
    async fn seed(pool: &PgPool, stock: i32) -> NewOrder {
        let product = Product::create(
            pool,
            &NewProduct {
                name: "PLAID SKIRT".into(),
                description: None,
                price_usdc: 69_000_000,
                size: Some("Small".into()),
                measurements: None,
                category: None,
                images: vec![],
                stock_quantity: stock,
                is_active: true,
            },
        )
        .await
        .unwrap();
        let user = User::find_or_create(pool, "0xbuyer").await.unwrap();

        NewOrder {
            user_id: user.id,
            product_id: product.id,
            product_price: usdc_to_cents(product.price_usdc),
            product_name: product.name,
            ..new_order(0, 758)
        }
    }

    async fn stock_of(pool: &PgPool, id: i64) -> i32 {
        sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn place_takes_stock_until_sold_out(pool: PgPool) {
        let new = seed(&pool, 1).await;

        let order = match Order::place(&pool, new.clone()).await.unwrap() {
            PlaceOrderOutcome::Placed(order) => order,
            PlaceOrderOutcome::OutOfStock => panic!("first order should succeed"),
        };
        assert_eq!(order.status, "pending");
        assert_eq!(order.product_price, 6_900);
        assert_eq!(order.total_amount, 7_658);
        assert!(order.order_number.starts_with("GF-"));
        assert_eq!(stock_of(&pool, new.product_id).await, 0);

        assert!(matches!(
            Order::place(&pool, new.clone()).await.unwrap(),
            PlaceOrderOutcome::OutOfStock
        ));
        assert_eq!(Order::list_by_user(&pool, new.user_id).await.unwrap().len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn status_updates_are_recorded(pool: PgPool) {
        let new = seed(&pool, 2).await;
        let PlaceOrderOutcome::Placed(order) = Order::place(&pool, new).await.unwrap() else {
            panic!("order should be placed");
        };

        let shipped = Order::update_status(&pool, order.id, "shipped", Some("USPS"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(shipped.status, "shipped");

        let history: Vec<(String, Option<String>)> = sqlx::query_as(
            "SELECT status, notes FROM order_status_history WHERE order_id = $1",
        )
        .bind(order.id)
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(history, vec![("shipped".to_string(), Some("USPS".to_string()))]);

        assert!(Order::update_status(&pool, -1, "shipped", None).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn shipping_update_keeps_absent_fields(pool: PgPool) {
        let new = NewOrder {
            easypost_rate_id: Some("rate_1".into()),
            ..seed(&pool, 1).await
        };
        let PlaceOrderOutcome::Placed(order) = Order::place(&pool, new).await.unwrap() else {
            panic!("order should be placed");
        };

        let updated = Order::update_shipping(
            &pool,
            order.id,
            &ShippingUpdate {
                tracking_number: Some("9400111899223".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.tracking_number.as_deref(), Some("9400111899223"));
        assert_eq!(updated.easypost_rate_id.as_deref(), Some("rate_1"));
        assert!(updated.easypost_shipment_id.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn ordered_products_cannot_be_deleted(pool: PgPool) {
        let new = seed(&pool, 1).await;
        let product_id = new.product_id;
        Order::place(&pool, new).await.unwrap();

        let err = Product::delete(&pool, product_id).await.unwrap_err();
        assert_eq!(
            err.as_database_error().and_then(|db| db.code()).as_deref(),
            Some("23503")
        );
    }
}
