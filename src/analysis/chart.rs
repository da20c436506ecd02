//! 單一商品的圖表序列

use crate::domain_types::{PriceTable, SeriesNormalizer};
use crate::utils::{format_date_label, round2};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 圖表預設保留的最近資料點數
pub const DEFAULT_CHART_POINTS: usize = 120;
/// 圖表短均線視窗
pub const CHART_SHORT_WINDOW: usize = 10;
/// 圖表長均線視窗
pub const CHART_LONG_WINDOW: usize = 30;

/// 收盤價與兩條均線，均已對齊到相同的日期標籤
///
/// 均線在視窗未滿的位置為 None（序列化為 null）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub close: Vec<f64>,
    pub ma10: Vec<Option<f64>>,
    pub ma30: Vec<Option<f64>>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// 建立圖表序列，只保留最近 `points` 筆；沒有有效收盤價時返回 None
///
/// 均線在截斷前以完整序列計算，因此截斷後的第一個點仍有完整視窗。
pub fn chart_series(table: &PriceTable, points: usize) -> Option<ChartSeries> {
    let series = SeriesNormalizer::normalize(table);
    if series.is_empty() {
        return None;
    }

    let (ma10, ma30) = match (
        series.moving_average(CHART_SHORT_WINDOW),
        series.moving_average(CHART_LONG_WINDOW),
    ) {
        (Ok(short), Ok(long)) => (short, long),
        (Err(e), _) | (_, Err(e)) => {
            warn!("均線計算失敗: {}", e);
            return None;
        }
    };

    let close = series.values();
    let skip = close.len().saturating_sub(points);
    let round_ma = |values: Vec<Option<f64>>| -> Vec<Option<f64>> {
        values.into_iter().skip(skip).map(|v| v.map(round2)).collect()
    };

    Some(ChartSeries {
        labels: series.dates()[skip..]
            .iter()
            .map(|&d| format_date_label(d))
            .collect(),
        close: close[skip..].iter().map(|&v| round2(v)).collect(),
        ma10: round_ma(ma10),
        ma30: round_ma(ma30),
    })
}
