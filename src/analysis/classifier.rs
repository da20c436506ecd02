//! 依期間類別切換的趨勢分類器

use super::result::{AnalysisResult, RawMetrics};
use crate::domain_types::{ClosingSeries, HorizonBucket, Signal, Trend};
use polars::prelude::PolarsResult;
use tracing::warn;

/// 長期類別中「強勢」訊號的趨勢強度門檻（百分比）
pub const STRONG_TREND_THRESHOLD: f64 = 0.4;

/// 趨勢分類器
///
/// 短期資料點太少，30 根均線沒有意義，因此每個期間類別各有
/// 自己的最小長度門檻與指標組合。序列長度不足時返回 None，
/// 呼叫端應將該商品排除。
pub struct TrendClassifier;

impl TrendClassifier {
    pub fn classify(series: &ClosingSeries, bucket: HorizonBucket) -> Option<AnalysisResult> {
        if series.len() < bucket.min_length() {
            return None;
        }

        let classified = match bucket {
            HorizonBucket::ShortHorizon => Self::classify_short(series).map(Some),
            HorizonBucket::MediumHorizon => Self::classify_medium(series),
            HorizonBucket::LongHorizon => Self::classify_long(series),
        };

        classified.unwrap_or_else(|e| {
            warn!("指標計算失敗 ({:?}): {}", bucket, e);
            None
        })
    }

    /// 5d：不使用均線，趨勢固定為 Momentum
    fn classify_short(series: &ClosingSeries) -> PolarsResult<AnalysisResult> {
        let raw = Self::base_metrics(series, HorizonBucket::ShortHorizon, 0.0)?;
        Ok(AnalysisResult::from_raw(raw, Trend::Momentum, Signal::ShortTermMomentum))
    }

    /// 1mo：5 / 10 均線
    fn classify_medium(series: &ClosingSeries) -> PolarsResult<Option<AnalysisResult>> {
        let Some((trend, strength)) = Self::ma_trend(series, HorizonBucket::MediumHorizon)? else {
            return Ok(None);
        };
        let signal = match trend {
            Trend::Bullish => Signal::ShortTermBullish,
            _ => Signal::ShortTermBearish,
        };

        let raw = Self::base_metrics(series, HorizonBucket::MediumHorizon, strength)?;
        Ok(Some(AnalysisResult::from_raw(raw, trend, signal)))
    }

    /// 3mo 以上：10 / 30 均線，強度超過門檻才給出強勢訊號
    fn classify_long(series: &ClosingSeries) -> PolarsResult<Option<AnalysisResult>> {
        let Some((trend, strength)) = Self::ma_trend(series, HorizonBucket::LongHorizon)? else {
            return Ok(None);
        };
        let signal = match trend {
            Trend::Bullish if strength > STRONG_TREND_THRESHOLD => Signal::StrongBullish,
            Trend::Bearish if strength < -STRONG_TREND_THRESHOLD => Signal::StrongBearish,
            _ => Signal::Neutral,
        };

        let raw = Self::base_metrics(series, HorizonBucket::LongHorizon, strength)?;
        Ok(Some(AnalysisResult::from_raw(raw, trend, signal)))
    }

    /// 快線高於慢線為 Bullish，強度為兩者的百分比距離
    fn ma_trend(series: &ClosingSeries, bucket: HorizonBucket) -> PolarsResult<Option<(Trend, f64)>> {
        let Some((fast_window, slow_window)) = bucket.ma_windows() else {
            return Ok(None);
        };
        let (Some(fast), Some(slow)) = (
            series.last_moving_average(fast_window)?,
            series.last_moving_average(slow_window)?,
        ) else {
            return Ok(None);
        };

        let trend = if fast > slow {
            Trend::Bullish
        } else {
            Trend::Bearish
        };
        let strength = if slow != 0.0 {
            (fast - slow) / slow * 100.0
        } else {
            0.0
        };

        Ok(Some((trend, strength)))
    }

    fn base_metrics(
        series: &ClosingSeries,
        bucket: HorizonBucket,
        trend_strength: f64,
    ) -> PolarsResult<RawMetrics> {
        Ok(RawMetrics {
            price: series.last().unwrap_or_default(),
            total_return: series.total_return(),
            trend_strength,
            momentum: series.momentum(bucket.momentum_lag(series.len()))?,
            volatility: series.volatility()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rstest::rstest;

    fn series(values: &[f64]) -> ClosingSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ClosingSeries::from_points(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (start + Duration::days(i as i64), v)),
        )
    }

    fn ramp(len: usize, start: f64, step: f64) -> Vec<f64> {
        (0..len).map(|i| start + step * i as f64).collect()
    }

    #[rstest]
    #[case(HorizonBucket::ShortHorizon, 1)]
    #[case(HorizonBucket::MediumHorizon, 9)]
    #[case(HorizonBucket::LongHorizon, 29)]
    fn test_gate_rejects_short_series(#[case] bucket: HorizonBucket, #[case] len: usize) {
        let s = series(&ramp(len, 100.0, 1.0));
        assert!(TrendClassifier::classify(&s, bucket).is_none());
    }

    #[rstest]
    #[case(HorizonBucket::ShortHorizon, 2)]
    #[case(HorizonBucket::MediumHorizon, 10)]
    #[case(HorizonBucket::LongHorizon, 30)]
    fn test_gate_accepts_minimum_length(#[case] bucket: HorizonBucket, #[case] len: usize) {
        let s = series(&ramp(len, 100.0, 1.0));
        assert!(TrendClassifier::classify(&s, bucket).is_some());
    }

    #[test]
    fn test_empty_series() {
        let s = ClosingSeries::default();
        assert!(TrendClassifier::classify(&s, HorizonBucket::ShortHorizon).is_none());
    }

    #[test]
    fn test_short_horizon_momentum() {
        let s = series(&[100.0, 110.0]);
        let result = TrendClassifier::classify(&s, HorizonBucket::ShortHorizon).unwrap();

        assert_eq!(result.price, 110.0);
        assert_eq!(result.total_return, 10.0);
        assert_eq!(result.trend, Trend::Momentum);
        assert_eq!(result.signal, Signal::ShortTermMomentum);
        assert_eq!(result.trend_strength, 0.0);
        assert_eq!(result.momentum, 10.0);
        assert_eq!(result.volatility, 0.0);
    }

    #[test]
    fn test_short_horizon_momentum_spans_whole_series() {
        let s = series(&[100.0, 95.0, 98.0, 101.0, 104.5]);
        let result = TrendClassifier::classify(&s, HorizonBucket::ShortHorizon).unwrap();
        assert_eq!(result.momentum, 4.5);
    }

    #[test]
    fn test_medium_horizon_bullish() {
        let s = series(&ramp(12, 100.0, 1.0));
        let result = TrendClassifier::classify(&s, HorizonBucket::MediumHorizon).unwrap();

        // 快線 (107..111) = 109，慢線 (102..111) = 106.5
        assert_eq!(result.trend, Trend::Bullish);
        assert_eq!(result.signal, Signal::ShortTermBullish);
        assert_eq!(result.trend_strength, 2.35);
        assert_eq!(result.momentum, 11.0);
        assert_eq!(result.total_return, 11.0);
    }

    #[test]
    fn test_medium_horizon_bearish_on_flat_series() {
        let s = series(&[50.0; 10]);
        let result = TrendClassifier::classify(&s, HorizonBucket::MediumHorizon).unwrap();

        assert_eq!(result.trend, Trend::Bearish);
        assert_eq!(result.signal, Signal::ShortTermBearish);
        assert_eq!(result.trend_strength, 0.0);
        assert_eq!(result.momentum, 0.0);
    }

    #[test]
    fn test_long_horizon_strong_bullish() {
        let s = series(&ramp(40, 100.0, 1.0));
        let result = TrendClassifier::classify(&s, HorizonBucket::LongHorizon).unwrap();

        // 短線 (130..139) = 134.5，長線 (110..139) = 124.5
        assert_eq!(result.trend, Trend::Bullish);
        assert_eq!(result.signal, Signal::StrongBullish);
        assert_eq!(result.trend_strength, 8.03);
        assert_eq!(result.momentum, 10.0);
        assert_eq!(result.price, 139.0);
    }

    #[test]
    fn test_long_horizon_strong_bearish() {
        let s = series(&ramp(40, 200.0, -1.0));
        let result = TrendClassifier::classify(&s, HorizonBucket::LongHorizon).unwrap();

        assert_eq!(result.trend, Trend::Bearish);
        assert_eq!(result.signal, Signal::StrongBearish);
        assert!(result.trend_strength < -0.4);
        assert_eq!(result.momentum, -10.0);
    }

    #[test]
    fn test_long_horizon_weak_trend_is_neutral() {
        // 30 根在 100 附近微幅上升，強度低於 0.4%
        let s = series(&ramp(30, 100.0, 0.01));
        let result = TrendClassifier::classify(&s, HorizonBucket::LongHorizon).unwrap();

        assert_eq!(result.trend, Trend::Bullish);
        assert_eq!(result.signal, Signal::Neutral);
        assert!(result.trend_strength.abs() <= 0.4);
    }

    #[test]
    fn test_long_horizon_zero_long_ma_guard() {
        let s = series(&[0.0; 30]);
        let result = TrendClassifier::classify(&s, HorizonBucket::LongHorizon).unwrap();

        assert_eq!(result.trend_strength, 0.0);
        assert_eq!(result.total_return, 0.0);
        assert_eq!(result.trend, Trend::Bearish);
        assert_eq!(result.signal, Signal::Neutral);
    }

    #[test]
    fn test_medium_horizon_zero_slow_ma_guard() {
        let s = series(&[0.0; 10]);
        let result = TrendClassifier::classify(&s, HorizonBucket::MediumHorizon).unwrap();

        assert_eq!(result.trend_strength, 0.0);
        assert_eq!(result.total_return, 0.0);
        assert_eq!(result.trend, Trend::Bearish);
        assert_eq!(result.signal, Signal::ShortTermBearish);
    }

    #[test]
    fn test_volatility_non_negative() {
        let s = series(&[100.0, 102.0, 97.0, 105.0, 99.0, 101.0, 98.0, 104.0, 100.0, 103.0]);
        for bucket in [HorizonBucket::ShortHorizon, HorizonBucket::MediumHorizon] {
            let result = TrendClassifier::classify(&s, bucket).unwrap();
            assert!(result.volatility >= 0.0);
        }
    }
}
