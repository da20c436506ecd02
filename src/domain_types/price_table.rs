//! 基於 Polars 的日線價格表

use super::types::{ColumnName, DomainError, Result};
use crate::utils::date_to_timestamp_ms;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// 單根日線 K 棒，價格可能缺值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

impl Bar {
    /// 四個價格皆存在的 K 棒
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
        }
    }
}

/// 單一商品的日線價格表
///
/// 包裝 DataFrame，欄位為 `time`（毫秒時間戳）與 `open`/`high`/`low`/`close`。
/// 上游可能把 `close` 交付為只保留一個欄位的結構欄（多層欄位殘留），
/// 由 [`SeriesNormalizer`](super::SeriesNormalizer) 負責攤平。
#[derive(Debug, Clone)]
pub struct PriceTable {
    df: DataFrame,
}

impl PriceTable {
    /// 從 K 棒建立價格表，K 棒需已按日期排序
    pub fn from_bars(bars: &[Bar]) -> PolarsResult<Self> {
        let time: Vec<i64> = bars.iter().map(|b| date_to_timestamp_ms(b.date)).collect();
        let open: Vec<Option<f64>> = bars.iter().map(|b| b.open).collect();
        let high: Vec<Option<f64>> = bars.iter().map(|b| b.high).collect();
        let low: Vec<Option<f64>> = bars.iter().map(|b| b.low).collect();
        let close: Vec<Option<f64>> = bars.iter().map(|b| b.close).collect();

        let df = df!(
            ColumnName::TIME => time,
            ColumnName::OPEN => open,
            ColumnName::HIGH => high,
            ColumnName::LOW => low,
            ColumnName::CLOSE => close,
        )?;

        Ok(Self { df })
    }

    /// 包裝既有的 DataFrame，驗證必要欄位
    pub fn from_frame(df: DataFrame) -> Result<Self> {
        let schema = df.schema();
        for &column in ColumnName::REQUIRED.iter() {
            if !schema.contains(column) {
                return Err(DomainError::MissingRequiredField(column.to_string()));
            }
        }

        Ok(Self { df })
    }

    /// K 棒數量（含收盤價缺值者）
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_from_bars() {
        let bars = vec![
            Bar::new(date(1), 100.0, 101.0, 99.0, 100.5),
            Bar {
                date: date(4),
                open: Some(100.5),
                high: None,
                low: None,
                close: None,
            },
        ];

        let table = PriceTable::from_bars(&bars).unwrap();
        assert_eq!(table.height(), 2);
        assert!(!table.is_empty());
        assert_eq!(table.frame().width(), 5);
    }

    #[test]
    fn test_from_frame_requires_ohlc() {
        let df = df!(
            ColumnName::TIME => [0i64, 86_400_000],
            ColumnName::CLOSE => [1.0, 2.0],
        )
        .unwrap();

        let err = PriceTable::from_frame(df).unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField("open".to_string()));
    }

    #[test]
    fn test_empty_table() {
        let table = PriceTable::from_bars(&[]).unwrap();
        assert!(table.is_empty());
    }
}
