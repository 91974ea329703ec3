use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::utils::hash_session_token;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminSession {
    pub id: i64,
    pub wallet_address: String,
    #[serde(skip_serializing)]
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// 过期时间超出可表示范围时返回错误
fn session_expiry(
    now: DateTime<Utc>,
    ttl: std::time::Duration,
) -> Result<DateTime<Utc>, sqlx::Error> {
    Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| sqlx::Error::Protocol(format!("Invalid session ttl: {:?}", ttl)))
}

impl AdminSession {
    /// 保存会话；表中只存令牌摘要
    pub async fn create(
        pool: &PgPool,
        wallet_address: &str,
        token: &str,
        ttl: std::time::Duration,
    ) -> Result<Self, sqlx::Error> {
        let expires_at = session_expiry(Utc::now(), ttl)?;

        sqlx::query_as::<_, AdminSession>(
            r#"
            INSERT INTO admin_sessions (wallet_address, session_token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(wallet_address.to_lowercase())
        .bind(hash_session_token(token))
        .bind(expires_at)
        .fetch_one(pool)
        .await
    }

    pub async fn find_valid(pool: &PgPool, token: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, AdminSession>(
            r#"
            SELECT * FROM admin_sessions
            WHERE session_token = $1 AND expires_at > NOW()
            "#,
        )
        .bind(hash_session_token(token))
        .fetch_optional(pool)
        .await
    }

    pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
