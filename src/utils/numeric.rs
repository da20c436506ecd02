// numeric.rs - 數值輔助函數

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 四捨五入至小數點後兩位（銀行家進位）
///
/// 以 f64 的精確二進位值進位，不先截成短十進位字串，因此 2.675 會得到 2.67。
/// 非有限值返回 0.0；超出 Decimal 範圍的值本身已無小數部分，原樣返回。
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
