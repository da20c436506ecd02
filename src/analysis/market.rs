//! 多商品分析

use super::classifier::TrendClassifier;
use super::result::AnalysisResult;
use crate::domain_types::{Period, PriceTable, SeriesNormalizer};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// 商品代碼 → 價格表；無法取得資料的商品為 None
pub type MarketData = HashMap<String, Option<PriceTable>>;

/// 商品代碼 → 分析結果，只包含通過最小長度門檻的商品
///
/// 使用者不應假設任何順序。
pub type MarketResults = BTreeMap<String, AnalysisResult>;

/// 市場分析器
pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// 分析單一價格表；表格為空或資料不足時返回 None
    pub fn analyze_asset(table: &PriceTable, period: Period) -> Option<AnalysisResult> {
        if table.is_empty() {
            return None;
        }
        let series = SeriesNormalizer::normalize(table);
        TrendClassifier::classify(&series, period.bucket())
    }

    /// 對每個商品平行執行分析，略過缺少資料或未通過門檻者
    pub fn analyze_market(data: &MarketData, period: Period) -> MarketResults {
        data.par_iter()
            .filter_map(|(symbol, table)| {
                let result = Self::analyze_asset(table.as_ref()?, period)?;
                Some((symbol.clone(), result))
            })
            .collect()
    }
}
