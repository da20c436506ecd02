//! 行情資料取得
//!
//! 分析核心只接受已清理的價格表；本模組負責從資料來源讀取、
//! 過濾無法使用的表格，並以有容量上限的 LRU 快取避免重複讀取。
pub mod cache;
pub mod loader;

pub use cache::{normalize_symbol, CacheKey, CacheStats, CachedMarketDataProvider};
pub use loader::{usable_table, CsvDirectorySource, MarketDataSource, DEFAULT_MIN_BARS};

use polars::prelude::PolarsError;
use thiserror::Error;

/// 資料來源錯誤
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("讀取資料失敗: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 解析失敗: {0}")]
    Csv(#[from] csv::Error),

    #[error("建立價格表失敗: {0}")]
    Frame(#[from] PolarsError),
}

/// 資料來源結果類型
pub type DataSourceResult<T> = Result<T, DataSourceError>;
