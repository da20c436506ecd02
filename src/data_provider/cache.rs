use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use super::loader::{usable_table, MarketDataSource};
use crate::analysis::MarketData;
use crate::domain_types::{Period, PriceTable};

/// 商品代碼正規化（去除空白並轉大寫）
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// 快取鍵：正規化後的商品代碼與期間
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub symbol: String,
    pub period: Period,
}

impl CacheKey {
    pub fn new(symbol: &str, period: Period) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            period,
        }
    }
}

/// 快取統計信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// 命中次數
    pub hits: u64,
    /// 未命中次數
    pub misses: u64,
    /// 當前快取項目數
    pub size: usize,
    /// 快取容量
    pub capacity: usize,
}

/// 帶 LRU 快取的行情提供者
///
/// 以 (商品, 期間) 為鍵記憶資料來源的結果，容量固定，超出時淘汰最久未使用者。
/// 「沒有資料」的結果同樣會被快取；讀取錯誤則不快取，下次請求會重試。
/// 對呼叫端而言，任何無法服務的商品一律以 None 表示，不會返回錯誤。
pub struct CachedMarketDataProvider<S: MarketDataSource> {
    source: S,
    cache: Mutex<LruCache<CacheKey, Option<PriceTable>>>,
    min_bars: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: MarketDataSource> CachedMarketDataProvider<S> {
    /// 創建新的快取提供者
    ///
    /// # Arguments
    /// * `source` - 底層資料來源
    /// * `capacity` - 快取容量
    /// * `min_bars` - 可用價格表的最少有效收盤價數量
    pub fn new(source: S, capacity: NonZeroUsize, min_bars: usize) -> Self {
        Self {
            source,
            cache: Mutex::new(LruCache::new(capacity)),
            min_bars,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 取得單一商品的價格表
    pub async fn fetch(&self, symbol: &str, period: Period) -> Option<PriceTable> {
        let key = CacheKey::new(symbol, period);

        let cached = { self.cache.lock().get(&key).cloned() };
        if let Some(entry) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("快取命中: {} {}", key.symbol, period);
            return entry;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let table = match self.source.fetch(&key.symbol, period).await {
            Ok(table) => table.and_then(|t| usable_table(t, self.min_bars)),
            Err(e) => {
                warn!("讀取 {} 失敗: {}", key.symbol, e);
                return None;
            }
        };

        if table.is_none() {
            info!("{} 沒有可用資料 (期間 {})", key.symbol, period);
        }

        self.cache.lock().put(key, table.clone());
        table
    }

    /// 取得多個商品的價格表，鍵為正規化後的商品代碼
    pub async fn fetch_market_data(&self, symbols: &[String], period: Period) -> MarketData {
        let mut data = MarketData::with_capacity(symbols.len());
        for symbol in symbols {
            let table = self.fetch(symbol, period).await;
            data.insert(normalize_symbol(symbol), table);
        }
        data
    }

    /// 獲取快取統計信息
    pub fn stats(&self) -> CacheStats {
        let cache = self.cache.lock();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: cache.len(),
            capacity: cache.cap().get(),
        }
    }

    /// 清空快取
    pub fn clear(&self) {
        self.cache.lock().clear();
    }
}
