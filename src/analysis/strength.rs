//! 單一商品的綜合強度分數

use super::regime::RegimeLabel;
use super::result::AnalysisResult;
use crate::domain_types::Signal;
use serde::{Deserialize, Serialize};

/// 趨勢強度正規化除數（百分比）
const TREND_SCALE: f64 = 2.0;
/// 動能正規化除數
const MOMENTUM_SCALE: f64 = 10.0;
/// 波動率懲罰的正規化除數（百分比）
const VOLATILITY_SCALE: f64 = 50.0;
/// 波動率下限，避免完全平坦的序列得不到懲罰
const MIN_VOLATILITY: f64 = 0.01;

const TREND_WEIGHT: f64 = 0.5;
const MOMENTUM_WEIGHT: f64 = 0.4;
const VOLATILITY_WEIGHT: f64 = 0.3;

/// 強勢訊號轉為 Risk-On 所需的最低分數
pub const RISK_ON_STRENGTH: u8 = 65;
/// 強勢空頭訊號轉為 Risk-Off 所需的最高分數
pub const RISK_OFF_STRENGTH: u8 = 35;

/// 綜合強度分數與由此推得的單一商品狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetStrength {
    pub score: u8,
    pub regime: RegimeLabel,
}

/// 綜合強度評分器
///
/// 趨勢強度與動能各自截在 ±1，波動率只作為懲罰項：
/// `50 + 50 × (0.5·trend + 0.4·momentum − 0.3·vol_penalty)`，
/// 四捨五入後限制在 0..=100。分數只用於展示，不影響整體市場狀態。
pub struct StrengthScorer;

impl StrengthScorer {
    pub fn assess(result: &AnalysisResult) -> AssetStrength {
        let score = Self::score(result);
        AssetStrength {
            score,
            regime: Self::regime(result.signal, score),
        }
    }

    pub fn score(result: &AnalysisResult) -> u8 {
        let trend = (result.trend_strength / TREND_SCALE).clamp(-1.0, 1.0);
        let momentum = (result.momentum / MOMENTUM_SCALE).clamp(-1.0, 1.0);
        let penalty = (result.volatility.max(MIN_VOLATILITY) / VOLATILITY_SCALE).min(1.0);

        let raw = trend * TREND_WEIGHT + momentum * MOMENTUM_WEIGHT - penalty * VOLATILITY_WEIGHT;

        // 中點一律往正方向進位
        let score = (50.0 + raw * 50.0 + 0.5).floor();
        if score.is_finite() {
            score.clamp(0.0, 100.0) as u8
        } else {
            50
        }
    }

    /// 只有強勢訊號配合足夠的分數才會偏離 Transitional
    pub fn regime(signal: Signal, score: u8) -> RegimeLabel {
        match signal {
            Signal::StrongBullish if score >= RISK_ON_STRENGTH => RegimeLabel::RiskOn,
            Signal::StrongBearish if score <= RISK_OFF_STRENGTH => RegimeLabel::RiskOff,
            _ => RegimeLabel::Transitional,
        }
    }
}
