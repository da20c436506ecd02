//! 基本分析類型定義

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 分析期間（與行情供應端的期間字串一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub const ALL: [Period; 10] = [
        Period::FiveDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::TenYears,
        Period::YearToDate,
        Period::Max,
    ];

    /// 期間字串
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }

    /// 該期間對應的分析區間類別
    pub fn bucket(&self) -> HorizonBucket {
        match self {
            Period::FiveDays => HorizonBucket::ShortHorizon,
            Period::OneMonth => HorizonBucket::MediumHorizon,
            _ => HorizonBucket::LongHorizon,
        }
    }

    /// 名義交易日數；`ytd` 與 `max` 由資料本身決定，返回 None
    pub fn approx_trading_days(&self) -> Option<usize> {
        match self {
            Period::FiveDays => Some(5),
            Period::OneMonth => Some(21),
            Period::ThreeMonths => Some(63),
            Period::SixMonths => Some(126),
            Period::OneYear => Some(252),
            Period::TwoYears => Some(504),
            Period::FiveYears => Some(1260),
            Period::TenYears => Some(2520),
            Period::YearToDate | Period::Max => None,
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::ThreeMonths
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| DomainError::InvalidPeriod(s.to_string()))
    }
}

/// 期間類別
///
/// 每個類別各自擁有最小長度門檻與指標組合：
///
/// | 類別 | 最小長度 | 均線 | 動能延遲 |
/// |---|---|---|---|
/// | ShortHorizon | 2 | 無 | 整段序列 |
/// | MediumHorizon | 10 | 5 / 10 | 整段序列 |
/// | LongHorizon | 30 | 10 / 30 | 10 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizonBucket {
    ShortHorizon,
    MediumHorizon,
    LongHorizon,
}

impl HorizonBucket {
    /// 該類別所需的最少收盤價數量
    pub fn min_length(&self) -> usize {
        match self {
            HorizonBucket::ShortHorizon => 2,
            HorizonBucket::MediumHorizon => 10,
            HorizonBucket::LongHorizon => 30,
        }
    }

    /// (快線, 慢線) 視窗；短期類別不使用均線
    pub fn ma_windows(&self) -> Option<(usize, usize)> {
        match self {
            HorizonBucket::ShortHorizon => None,
            HorizonBucket::MediumHorizon => Some((5, 10)),
            HorizonBucket::LongHorizon => Some((10, 30)),
        }
    }

    /// 長度為 `len` 的序列所使用的動能延遲
    pub fn momentum_lag(&self, len: usize) -> usize {
        match self {
            HorizonBucket::ShortHorizon | HorizonBucket::MediumHorizon => len.saturating_sub(1),
            HorizonBucket::LongHorizon => 10,
        }
    }
}

/// 趨勢方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Momentum,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => write!(f, "Bullish"),
            Trend::Bearish => write!(f, "Bearish"),
            Trend::Momentum => write!(f, "Momentum"),
        }
    }
}

/// 訊號方向標記，供市場狀態彙總使用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalDirection {
    Bullish,
    Bearish,
}

/// 單一商品的訊號標籤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "Short-Term Momentum")]
    ShortTermMomentum,
    #[serde(rename = "Short-Term Bullish")]
    ShortTermBullish,
    #[serde(rename = "Short-Term Bearish")]
    ShortTermBearish,
    #[serde(rename = "Strong Bullish")]
    StrongBullish,
    #[serde(rename = "Strong Bearish")]
    StrongBearish,
    Neutral,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::ShortTermMomentum => "Short-Term Momentum",
            Signal::ShortTermBullish => "Short-Term Bullish",
            Signal::ShortTermBearish => "Short-Term Bearish",
            Signal::StrongBullish => "Strong Bullish",
            Signal::StrongBearish => "Strong Bearish",
            Signal::Neutral => "Neutral",
        }
    }

    /// 訊號的多空方向；動能與中性訊號沒有方向
    pub fn direction(&self) -> Option<SignalDirection> {
        match self {
            Signal::ShortTermBullish | Signal::StrongBullish => Some(SignalDirection::Bullish),
            Signal::ShortTermBearish | Signal::StrongBearish => Some(SignalDirection::Bearish),
            Signal::ShortTermMomentum | Signal::Neutral => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 領域錯誤類型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("無效的期間: {0}")]
    InvalidPeriod(String),

    #[error("缺少必要欄位: {0}")]
    MissingRequiredField(String),
}

/// 領域結果類型
pub type Result<T> = std::result::Result<T, DomainError>;

/// 標準列名定義
pub struct ColumnName;

impl ColumnName {
    pub const TIME: &'static str = "time"; // 以毫秒為單位的 i64 時間戳
    pub const OPEN: &'static str = "open"; // 開盤價
    pub const HIGH: &'static str = "high"; // 最高價
    pub const LOW: &'static str = "low"; // 最低價
    pub const CLOSE: &'static str = "close"; // 收盤價

    /// 價格表必須具備的欄位
    pub const REQUIRED: [&'static str; 5] = [
        ColumnName::TIME,
        ColumnName::OPEN,
        ColumnName::HIGH,
        ColumnName::LOW,
        ColumnName::CLOSE,
    ];
}
