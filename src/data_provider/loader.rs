use async_trait::async_trait;
use chrono::Datelike;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::DataSourceResult;
use crate::domain_types::{Bar, Period, PriceTable, SeriesNormalizer};
use crate::utils::parse_date_label;

/// 可用價格表的最少有效收盤價數量
pub const DEFAULT_MIN_BARS: usize = 5;

/// 行情資料來源特性
///
/// 無法提供資料的商品應返回 `Ok(None)`；`Err` 只保留給真正的讀取失敗。
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// 取得指定商品在指定期間內的日線價格表
    async fn fetch(&self, symbol: &str, period: Period) -> DataSourceResult<Option<PriceTable>>;
}

/// 過濾無法使用的價格表：有效收盤價少於 `min_bars` 者丟棄
pub fn usable_table(table: PriceTable, min_bars: usize) -> Option<PriceTable> {
    let valid = SeriesNormalizer::normalize(&table).len();
    if valid < min_bars {
        debug!("價格表只有 {} 筆有效收盤價，低於門檻 {}", valid, min_bars);
        return None;
    }
    Some(table)
}

/// 從目錄讀取 `<SYMBOL>.csv` 的資料來源
///
/// CSV 需有 `Date,Open,High,Low,Close` 標題（不分大小寫，其他欄位忽略）。
/// 讀入後按日期排序、去除重複日期，再截取到期間對應的最近交易日數。
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    directory: PathBuf,
}

impl CsvDirectorySource {
    const DATE: &'static str = "date";
    const OPEN: &'static str = "open";
    const HIGH: &'static str = "high";
    const LOW: &'static str = "low";
    const CLOSE: &'static str = "close";

    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.directory.join(format!("{}.csv", symbol))
    }

    /// 解析 CSV 內容；缺少必要欄位時返回 None
    pub fn parse_bars(data: &[u8]) -> DataSourceResult<Option<Vec<Bar>>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(data);

        let headers = reader.headers()?.clone();
        let index = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

        let (Some(date_idx), Some(open_idx), Some(high_idx), Some(low_idx), Some(close_idx)) = (
            index(Self::DATE),
            index(Self::OPEN),
            index(Self::HIGH),
            index(Self::LOW),
            index(Self::CLOSE),
        ) else {
            return Ok(None);
        };

        let mut bars = Vec::new();
        for record in reader.records() {
            let record = record?;
            let Some(date) = record.get(date_idx).and_then(parse_date_label) else {
                continue;
            };
            let price = |idx: usize| record.get(idx).and_then(parse_price);

            bars.push(Bar {
                date,
                open: price(open_idx),
                high: price(high_idx),
                low: price(low_idx),
                close: price(close_idx),
            });
        }

        // 日期必須嚴格遞增
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);

        Ok(Some(bars))
    }

    /// 只保留期間對應的最近 K 棒
    pub fn trim_to_period(bars: &mut Vec<Bar>, period: Period) {
        let keep = match (period, period.approx_trading_days()) {
            (_, Some(days)) => days,
            (Period::YearToDate, None) => match bars.last() {
                Some(last) => {
                    let year = last.date.year();
                    bars.iter().filter(|b| b.date.year() == year).count()
                }
                None => 0,
            },
            (_, None) => bars.len(),
        };

        let skip = bars.len().saturating_sub(keep);
        bars.drain(..skip);
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[async_trait]
impl MarketDataSource for CsvDirectorySource {
    async fn fetch(&self, symbol: &str, period: Period) -> DataSourceResult<Option<PriceTable>> {
        let path = self.path_for(symbol);
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("找不到 {} 的資料檔: {}", symbol, path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let Some(mut bars) = Self::parse_bars(&data)? else {
            warn!("{} 缺少必要的 OHLC 欄位，略過", path.display());
            return Ok(None);
        };
        Self::trim_to_period(&mut bars, period);

        if bars.is_empty() {
            return Ok(None);
        }
        Ok(Some(PriceTable::from_bars(&bars)?))
    }
}
