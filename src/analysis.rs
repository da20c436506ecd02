/// 市場分析模組
///
/// 將收盤價序列轉換為單一商品的趨勢判讀，並彙總為整體市場狀態。
/// 本模組不做 I/O，也不保留跨呼叫狀態。
pub mod chart;
pub mod classifier;
pub mod market;
pub mod regime;
pub mod result;
pub mod strength;

pub use chart::{chart_series, ChartSeries, DEFAULT_CHART_POINTS};
pub use classifier::TrendClassifier;
pub use market::{MarketAnalyzer, MarketData, MarketResults};
pub use regime::{RegimeAggregator, RegimeLabel, RegimeSummary};
pub use result::AnalysisResult;
pub use strength::{AssetStrength, StrengthScorer};
