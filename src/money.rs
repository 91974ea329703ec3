//! USDC 定点金额换算
//!
//! 商品价格以 micro-USDC 整数存储（6 位隐含小数），订单金额以美分存储。

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub const USDC_DECIMALS: u32 = 6;
pub const MICRO_PER_USDC: i64 = 1_000_000;
const MICRO_PER_CENT: i64 = 10_000;
/// 单件商品价格上限：10 亿 USDC
pub const MAX_PRICE_MICRO: i64 = 1_000_000_000 * MICRO_PER_USDC;

pub fn micro_to_usdc(micro: i64) -> Decimal {
    Decimal::new(micro, USDC_DECIMALS)
}

/// 超过 6 位小数或溢出时返回 None
pub fn usdc_to_micro(usdc: Decimal) -> Option<i64> {
    let micro = usdc.checked_mul(Decimal::from(MICRO_PER_USDC))?;
    if !micro.fract().is_zero() {
        return None;
    }
    micro.to_i64()
}

/// 店面价格标签，例如 "45 USDC"
pub fn format_usdc_whole(micro: i64) -> String {
    let whole = micro_to_usdc(micro).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.0} USDC", whole)
}

/// micro-USDC 转美分，四舍五入（.5 向上）
pub fn usdc_to_cents(micro: i64) -> i64 {
    let cents = micro.div_euclid(MICRO_PER_CENT);
    if micro.rem_euclid(MICRO_PER_CENT) >= MICRO_PER_CENT / 2 {
        cents + 1
    } else {
        cents
    }
}

pub fn dollars_to_cents(dollars: Decimal) -> Option<i64> {
    dollars
        .checked_mul(Decimal::from(100))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// 支付网关使用的两位小数金额字符串
pub fn charge_amount(micro: i64) -> String {
    let amount = micro_to_usdc(micro).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", amount)
}
