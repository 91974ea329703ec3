use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::result::ApiResult;

pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResult<T>> {
    Json(ApiResult::success(data))
}

/// 生成管理员会话令牌（不透明随机串）
pub fn generate_session_token() -> String {
    format!("admin_{}", Uuid::new_v4().simple())
}

/// 数据库中只保存令牌的 SHA-256 摘要
pub fn hash_session_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// 订单号：GF-<毫秒时间戳>-<9 位大写字母数字>
pub fn generate_order_number() -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(9)
        .collect::<String>()
        .to_uppercase();
    format!("GF-{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// 钱包地址比较忽略大小写
pub fn wallets_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn round_to_i64(value: f64) -> Option<i64> {
    let rounded = value.round();
    (rounded.is_finite() && rounded.abs() < i64::MAX as f64).then_some(rounded as i64)
}

/// 接受数字或数字字符串，例如 `42`、`"42"`；浮点数四舍五入
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(NumberOrString::Integer(n)) => Ok(Some(n)),
        Some(NumberOrString::Float(f)) => round_to_i64(f)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid integer: {}", f))),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(round_to_i64))
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid integer: {}", s)))
        }
    }
}
