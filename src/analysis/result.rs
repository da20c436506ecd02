//! 單一商品分析結果

use crate::domain_types::{Signal, Trend};
use crate::utils::round2;
use serde::{Deserialize, Serialize};

/// 單一商品的分析結果
///
/// 數值欄位在建構時統一進位到小數點後兩位；內部計算保持完整精度。
/// `trend_strength` 是兩條均線的百分比距離，僅作描述用途，
/// 並未正規化到任何固定尺度，也不代表統計信心。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub price: f64,
    pub total_return: f64,
    pub trend: Trend,
    pub trend_strength: f64,
    pub signal: Signal,
    pub momentum: f64,
    pub volatility: f64,
}

/// 未進位的原始指標
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawMetrics {
    pub price: f64,
    pub total_return: f64,
    pub trend_strength: f64,
    pub momentum: f64,
    pub volatility: f64,
}

impl AnalysisResult {
    pub(crate) fn from_raw(raw: RawMetrics, trend: Trend, signal: Signal) -> Self {
        Self {
            price: round2(raw.price),
            total_return: round2(raw.total_return),
            trend,
            trend_strength: round2(raw.trend_strength),
            signal,
            momentum: round2(raw.momentum),
            volatility: round2(raw.volatility),
        }
    }
}
