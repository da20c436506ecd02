use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::analysis::DEFAULT_CHART_POINTS;
use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::data_provider::DEFAULT_MIN_BARS;
use crate::domain_types::Period;

/// 應用程序配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub log: LogConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub data: DataConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        self.log.validate()?;
        self.analysis.validate()?;
        self.data.validate()?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level.to_lowercase().as_str(),
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;

        // 驗證日誌格式
        ValidationUtils::one_of(&self.format.to_lowercase().as_str(), &["pretty", "json"], "log.format")?;

        Ok(())
    }
}

/// 分析預設值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 未指定商品時分析的清單
    pub default_symbols: Vec<String>,
    /// 未指定期間時使用的期間字串
    pub default_period: String,
    /// 圖表保留的最近資料點數
    pub chart_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_symbols: vec!["AAPL".to_string(), "MSFT".to_string(), "SPY".to_string()],
            default_period: Period::default().to_string(),
            chart_points: DEFAULT_CHART_POINTS,
        }
    }
}

impl AnalysisConfig {
    /// 解析後的預設期間
    pub fn period(&self) -> Result<Period, ValidationError> {
        Period::from_str(&self.default_period).map_err(|e| ValidationError::InvalidValue(e.to_string()))
    }
}

impl Validator for AnalysisConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.default_symbols.is_empty() {
            return Err(ValidationError::MissingField("analysis.default_symbols".to_string()));
        }
        for symbol in &self.default_symbols {
            ValidationUtils::not_empty(symbol, "analysis.default_symbols")?;
        }

        self.period()?;
        ValidationUtils::in_range(self.chart_points, 1, 5000, "analysis.chart_points")?;

        Ok(())
    }
}

/// 資料來源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 存放 `<SYMBOL>.csv` 的目錄
    pub directory: String,
    /// LRU 快取容量
    pub cache_capacity: usize,
    /// 可用價格表的最少有效收盤價數量
    #[serde(default = "default_min_bars")]
    pub min_bars: usize,
}

fn default_min_bars() -> usize {
    DEFAULT_MIN_BARS
}

impl Validator for DataConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.directory, "data.directory")?;
        ValidationUtils::in_range(self.cache_capacity, 1, 10_000, "data.cache_capacity")?;
        ValidationUtils::in_range(self.min_bars, 1, 10_000, "data.min_bars")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sample() -> ApplicationConfig {
        ApplicationConfig {
            log: LogConfig::default(),
            analysis: AnalysisConfig::default(),
            data: DataConfig {
                directory: "data".to_string(),
                cache_capacity: 64,
                min_bars: DEFAULT_MIN_BARS,
            },
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = sample();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.period().unwrap(), Period::ThreeMonths);
        assert_eq!(config.analysis.default_symbols, vec!["AAPL", "MSFT", "SPY"]);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = sample();
        config.log.level = "verbose".to_string();
        assert_matches!(config.validate(), Err(ValidationError::InvalidValue(_)));
    }

    #[test]
    fn test_invalid_period() {
        let mut config = sample();
        config.analysis.default_period = "3w".to_string();
        assert_matches!(config.validate(), Err(ValidationError::InvalidValue(_)));
    }

    #[test]
    fn test_cache_capacity_range() {
        let mut config = sample();
        config.data.cache_capacity = 0;
        assert_matches!(config.validate(), Err(ValidationError::RangeError { .. }));
    }

    #[test]
    fn test_empty_symbol_list() {
        let mut config = sample();
        config.analysis.default_symbols.clear();
        assert_matches!(config.validate(), Err(ValidationError::MissingField(_)));
    }
}
