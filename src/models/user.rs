use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::address::Address;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub wallet_address: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: i64,
    pub physical_address: Option<Json<Address>>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileData {
    pub physical_address: Option<Address>,
    pub phone: Option<String>,
    pub name: Option<String>,
}

impl User {
    /// 按钱包地址创建或更新用户；新邮箱为空时保留旧值
    pub async fn upsert(
        pool: &PgPool,
        wallet_address: &str,
        email: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (wallet_address, email)
            VALUES ($1, $2)
            ON CONFLICT (wallet_address)
            DO UPDATE SET
                email = COALESCE(EXCLUDED.email, users.email),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(wallet_address)
        .bind(email)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_wallet(
        pool: &PgPool,
        wallet_address: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE wallet_address = $1")
            .bind(wallet_address)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_or_create(pool: &PgPool, wallet_address: &str) -> Result<Self, sqlx::Error> {
        match Self::find_by_wallet(pool, wallet_address).await? {
            Some(user) => Ok(user),
            None => {
                tracing::debug!("Creating user for wallet {}", wallet_address);
                Self::upsert(pool, wallet_address, None).await
            }
        }
    }
}

impl UserProfile {
    pub async fn upsert(
        pool: &PgPool,
        user_id: i64,
        data: ProfileData,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (user_id, physical_address, phone, name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id)
            DO UPDATE SET
                physical_address = COALESCE(EXCLUDED.physical_address, user_profiles.physical_address),
                phone = COALESCE(EXCLUDED.phone, user_profiles.phone),
                name = COALESCE(EXCLUDED.name, user_profiles.name),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(data.physical_address.map(Json))
        .bind(data.phone)
        .bind(data.name)
        .fetch_one(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    async fn upsert_keeps_existing_email(pool: PgPool) {
        let created = User::upsert(&pool, "0xwallet", Some("fairy@gutter.shop"))
            .await
            .unwrap();
        let again = User::upsert(&pool, "0xwallet", None).await.unwrap();
        assert_eq!(again.id, created.id);
        assert_eq!(again.email.as_deref(), Some("fairy@gutter.shop"));

        let changed = User::upsert(&pool, "0xwallet", Some("new@gutter.shop"))
            .await
            .unwrap();
        assert_eq!(changed.email.as_deref(), Some("new@gutter.shop"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn find_or_create_reuses_user(pool: PgPool) {
        assert!(User::find_by_wallet(&pool, "0xnew").await.unwrap().is_none());
        let first = User::find_or_create(&pool, "0xnew").await.unwrap();
        let second = User::find_or_create(&pool, "0xnew").await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(first.email.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn profile_upsert_coalesces_fields(pool: PgPool) {
        let user = User::upsert(&pool, "0xprofile", None).await.unwrap();
        let address = Address {
            street1: Some("1 Market St".into()),
            zip: Some("94105".into()),
            ..Default::default()
        };

        UserProfile::upsert(
            &pool,
            user.id,
            ProfileData {
                physical_address: Some(address.clone()),
                phone: Some("5551234567".into()),
                name: Some("Ada".into()),
            },
        )
        .await
        .unwrap();

        let updated = UserProfile::upsert(
            &pool,
            user.id,
            ProfileData {
                name: Some("Ada Lovelace".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(updated.phone.as_deref(), Some("5551234567"));
        assert_eq!(updated.physical_address.map(|a| a.0), Some(address));
    }
}
