//! 市場狀態彙總

use super::result::AnalysisResult;
use crate::domain_types::SignalDirection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk-On 門檻（百分比，含等號）
pub const RISK_ON_THRESHOLD_PCT: usize = 65;
/// Risk-Off 門檻（百分比，含等號）
pub const RISK_OFF_THRESHOLD_PCT: usize = 35;
/// 沒有任何方向性訊號時的固定分數
pub const NEUTRAL_SCORE: u8 = 50;

/// 整體市場狀態標籤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegimeLabel {
    #[serde(rename = "No Data")]
    NoData,
    Neutral,
    #[serde(rename = "Risk-On")]
    RiskOn,
    #[serde(rename = "Risk-Off")]
    RiskOff,
    Transitional,
}

impl fmt::Display for RegimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegimeLabel::NoData => write!(f, "No Data"),
            RegimeLabel::Neutral => write!(f, "Neutral"),
            RegimeLabel::RiskOn => write!(f, "Risk-On"),
            RegimeLabel::RiskOff => write!(f, "Risk-Off"),
            RegimeLabel::Transitional => write!(f, "Transitional"),
        }
    }
}

/// 市場狀態摘要；`score` 介於 0..=100，No Data 時為 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeSummary {
    pub label: RegimeLabel,
    pub score: u8,
}

impl RegimeSummary {
    pub const NO_DATA: RegimeSummary = RegimeSummary {
        label: RegimeLabel::NoData,
        score: 0,
    };

    pub const NEUTRAL: RegimeSummary = RegimeSummary {
        label: RegimeLabel::Neutral,
        score: NEUTRAL_SCORE,
    };
}

/// 市場狀態彙總器
///
/// 以多數決估算：多方訊號佔有方向訊號的比例。這只是簡單的投票，
/// 不是經過統計校準的指數。比例與門檻的比較以整數進行，
/// 避免 0.65 之類的浮點表示誤差影響分類；分數取無條件捨去。
pub struct RegimeAggregator;

impl RegimeAggregator {
    pub fn summarize<'a, I>(results: I) -> RegimeSummary
    where
        I: IntoIterator<Item = &'a AnalysisResult>,
    {
        let mut total = 0usize;
        let mut bullish = 0usize;
        let mut bearish = 0usize;

        for result in results {
            total += 1;
            match result.signal.direction() {
                Some(SignalDirection::Bullish) => bullish += 1,
                Some(SignalDirection::Bearish) => bearish += 1,
                None => {}
            }
        }

        if total == 0 {
            return RegimeSummary::NO_DATA;
        }

        let directional = bullish + bearish;
        if directional == 0 {
            return RegimeSummary::NEUTRAL;
        }

        let label = if bullish * 100 >= RISK_ON_THRESHOLD_PCT * directional {
            RegimeLabel::RiskOn
        } else if bullish * 100 <= RISK_OFF_THRESHOLD_PCT * directional {
            RegimeLabel::RiskOff
        } else {
            RegimeLabel::Transitional
        };

        // bullish <= directional，因此結果必在 0..=100
        let score = (bullish * 100 / directional) as u8;

        RegimeSummary { label, score }
    }
}
