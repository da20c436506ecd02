//! 收盤價序列與正規化

use super::price_table::PriceTable;
use super::types::ColumnName;
use crate::utils::timestamp_ms_to_date;
use chrono::NaiveDate;
use polars::prelude::*;

/// 按時間排序、已去除缺值的收盤價序列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClosingSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ClosingSeries {
    /// 由 (日期, 收盤價) 建立；非有限值會被略過
    pub fn from_points(points: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        let (dates, values) = points.into_iter().filter(|(_, v)| v.is_finite()).unzip();
        Self { dates, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// 收盤價正規化器
///
/// 從價格表取出 `close` 欄為一維序列。結構欄取第一個子欄位，
/// 缺值與 NaN 一律丟棄。任何無法解讀的情況都返回空序列，
/// 由呼叫端視為「資料不足」。
pub struct SeriesNormalizer;

impl SeriesNormalizer {
    pub fn normalize(table: &PriceTable) -> ClosingSeries {
        Self::try_normalize(table.frame()).unwrap_or_default()
    }

    fn try_normalize(df: &DataFrame) -> PolarsResult<ClosingSeries> {
        let close = Self::close_column(df)?.cast(&DataType::Float64)?;
        let time = df
            .column(ColumnName::TIME)?
            .as_materialized_series()
            .cast(&DataType::Int64)?;

        let points = time
            .i64()?
            .into_iter()
            .zip(close.f64()?.into_iter())
            .filter_map(|(ts, value)| {
                let date = ts.and_then(timestamp_ms_to_date)?;
                value.map(|v| (date, v))
            });

        Ok(ClosingSeries::from_points(points))
    }

    fn close_column(df: &DataFrame) -> PolarsResult<Series> {
        let series = df.column(ColumnName::CLOSE)?.as_materialized_series();

        match series.dtype() {
            DataType::Struct(_) => series
                .struct_()?
                .fields_as_series()
                .into_iter()
                .next()
                .ok_or_else(|| PolarsError::NoData("close 結構欄沒有任何子欄位".into())),
            _ => Ok(series.clone()),
        }
    }
}
