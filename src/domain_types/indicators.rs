//! 基本技術指標實現

use super::series::ClosingSeries;
use super::types::ColumnName;
use polars::prelude::*;
use polars::series::ops::NullBehavior;
use statrs::statistics::Statistics;

/// 年化波動率所用的每年交易日數
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// 為 DataFrame 添加技術指標功能的擴展 trait
pub trait IndicatorsExt {
    /// 簡單移動平均線，視窗未滿的位置為 null
    fn sma(&self, column: &str, window: usize, alias: Option<&str>) -> PolarsResult<DataFrame>;

    /// 日報酬率，第一列為 null
    fn daily_returns(&self, column: &str, alias: Option<&str>) -> PolarsResult<DataFrame>;

    /// 與 `lag` 列之前的差，前 `lag` 列為 null
    fn momentum(&self, column: &str, lag: usize, alias: Option<&str>) -> PolarsResult<DataFrame>;
}

impl IndicatorsExt for DataFrame {
    fn sma(&self, column: &str, window: usize, alias: Option<&str>) -> PolarsResult<DataFrame> {
        let default_alias = format!("sma_{}_{}", column, window);
        let alias = alias.unwrap_or(&default_alias);

        let expr = col(column)
            .rolling_mean(RollingOptionsFixedWindow {
                window_size: window,
                min_periods: window,
                ..Default::default()
            })
            .alias(alias);

        self.clone().lazy().with_column(expr).collect()
    }

    fn daily_returns(&self, column: &str, alias: Option<&str>) -> PolarsResult<DataFrame> {
        let default_alias = format!("pct_{}", column);
        let alias = alias.unwrap_or(&default_alias);

        let expr = col(column).pct_change(lit(1)).alias(alias);

        self.clone().lazy().with_column(expr).collect()
    }

    fn momentum(&self, column: &str, lag: usize, alias: Option<&str>) -> PolarsResult<DataFrame> {
        let default_alias = format!("mom_{}_{}", column, lag);
        let alias = alias.unwrap_or(&default_alias);

        let expr = col(column)
            .diff(lit(lag as i64), NullBehavior::Ignore)
            .alias(alias);

        self.clone().lazy().with_column(expr).collect()
    }
}

const SMA_COLUMN: &str = "sma";
const RETURN_COLUMN: &str = "daily_return";
const MOMENTUM_COLUMN: &str = "momentum";

fn float_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    Ok(df
        .column(name)?
        .as_materialized_series()
        .f64()?
        .into_iter()
        .collect())
}

/// 收盤價序列上的指標，全部經由 [`IndicatorsExt`] 的表達式計算
///
/// 分類器與圖表共用這組方法，保證兩邊的均線定義一致。
/// 結果都是未四捨五入的精度，進位只在組裝輸出時發生。
impl ClosingSeries {
    /// 單欄 `close` 的 DataFrame
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        df!(ColumnName::CLOSE => self.values())
    }

    /// 區間總報酬（百分比）；第一根收盤價為 0 時為 0.0
    pub fn total_return(&self) -> f64 {
        match (self.values().first(), self.last()) {
            (Some(&first), Some(last)) if first != 0.0 => (last / first - 1.0) * 100.0,
            _ => 0.0,
        }
    }

    /// 與收盤價逐點對齊的移動平均
    pub fn moving_average(&self, window: usize) -> PolarsResult<Vec<Option<f64>>> {
        if window == 0 {
            return Ok(vec![None; self.len()]);
        }

        let df = self
            .to_frame()?
            .sma(ColumnName::CLOSE, window, Some(SMA_COLUMN))?;
        float_column(&df, SMA_COLUMN)
    }

    /// 最後一個移動平均值；資料不足一個視窗時為 None
    pub fn last_moving_average(&self, window: usize) -> PolarsResult<Option<f64>> {
        Ok(self.moving_average(window)?.last().copied().flatten())
    }

    /// 最後一根與 `lag` 根之前的差；序列長度不超過 `lag` 時為 0.0
    pub fn momentum(&self, lag: usize) -> PolarsResult<f64> {
        let df = self
            .to_frame()?
            .momentum(ColumnName::CLOSE, lag, Some(MOMENTUM_COLUMN))?;
        Ok(float_column(&df, MOMENTUM_COLUMN)?
            .last()
            .copied()
            .flatten()
            .unwrap_or(0.0))
    }

    /// 日報酬率；第一根沒有報酬因此不包含在內
    pub fn daily_returns(&self) -> PolarsResult<Vec<f64>> {
        let df = self
            .to_frame()?
            .daily_returns(ColumnName::CLOSE, Some(RETURN_COLUMN))?;
        Ok(float_column(&df, RETURN_COLUMN)?
            .into_iter()
            .skip(1)
            .flatten()
            .collect())
    }

    /// 年化波動率（樣本標準差 × √252）；報酬少於兩筆或結果非有限值時為 0.0
    pub fn volatility(&self) -> PolarsResult<f64> {
        let returns = self.daily_returns()?;
        if returns.len() < 2 {
            return Ok(0.0);
        }

        let annualized = returns.iter().std_dev() * TRADING_DAYS_PER_YEAR.sqrt();
        Ok(if annualized.is_finite() { annualized } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn series(values: &[f64]) -> ClosingSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ClosingSeries::from_points(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (start + Duration::days(i as i64), v)),
        )
    }

    #[test]
    fn test_sma_column_on_frame() {
        let df = df!("close" => &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let out = df.sma("close", 3, None).unwrap();

        assert_eq!(out.width(), 2);
        assert_eq!(
            float_column(&out, "sma_close_3").unwrap(),
            vec![None, None, Some(2.0), Some(3.0), Some(4.0)]
        );
    }

    #[test]
    fn test_total_return() {
        assert!((series(&[100.0, 110.0]).total_return() - 10.0).abs() < 1e-9);
        assert_eq!(series(&[0.0, 5.0]).total_return(), 0.0);
        assert_eq!(ClosingSeries::default().total_return(), 0.0);
    }

    #[test]
    fn test_moving_average() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(
            s.moving_average(3).unwrap(),
            vec![None, None, Some(2.0), Some(3.0), Some(4.0)]
        );
        assert_eq!(s.last_moving_average(3).unwrap(), Some(4.0));
        assert_eq!(s.last_moving_average(5).unwrap(), Some(3.0));
        assert_eq!(s.last_moving_average(6).unwrap(), None);
    }

    #[test]
    fn test_moving_average_window_longer_than_series() {
        let s = series(&[1.0, 2.0]);
        assert_eq!(s.moving_average(5).unwrap(), vec![None, None]);
        assert_eq!(s.moving_average(0).unwrap(), vec![None, None]);
    }

    #[test]
    fn test_momentum_defaults_to_zero() {
        let s = series(&[10.0, 11.0, 12.5]);
        assert_eq!(s.momentum(2).unwrap(), 2.5);
        assert_eq!(s.momentum(3).unwrap(), 0.0);
        assert_eq!(s.momentum(10).unwrap(), 0.0);
    }

    #[test]
    fn test_daily_returns_skip_first_bar() {
        let returns = series(&[100.0, 110.0, 99.0]).daily_returns().unwrap();
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.1).abs() < 1e-12);
        assert!((returns[1] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_volatility_uses_sample_std() {
        // 日報酬 +10% 與 -10%，樣本標準差為 0.1414...
        let expected = (0.02_f64).sqrt() * 252.0_f64.sqrt();
        let vol = series(&[100.0, 110.0, 99.0]).volatility().unwrap();
        assert!((vol - expected).abs() < 1e-9);
    }

    #[test]
    fn test_volatility_degenerate_inputs() {
        assert_eq!(series(&[100.0, 101.0]).volatility().unwrap(), 0.0);
        assert_eq!(series(&[5.0, 5.0, 5.0, 5.0]).volatility().unwrap(), 0.0);
        assert_eq!(series(&[0.0, 1.0, 2.0]).volatility().unwrap(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_volatility_non_negative(close in prop::collection::vec(0.01f64..10_000.0, 2..200)) {
            prop_assert!(series(&close).volatility().unwrap() >= 0.0);
        }
    }
}
