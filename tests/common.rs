#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::fs;
use std::path::Path;

/// 線性走勢的收盤價
pub fn ramp(len: usize, start: f64, step: f64) -> Vec<f64> {
    (0..len).map(|i| start + step * i as f64).collect()
}

/// 以收盤價寫出 `<symbol>.csv`，日期從 2024-01-01 起逐日遞增
pub fn write_csv(dir: &Path, symbol: &str, closes: &[f64]) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut content = String::from("Date,Open,High,Low,Close,Volume\n");
    for (i, close) in closes.iter().enumerate() {
        let date = start + Duration::days(i as i64);
        content.push_str(&format!(
            "{},{:.4},{:.4},{:.4},{:.4},1000\n",
            date.format("%Y-%m-%d"),
            close,
            close + 1.0,
            close - 1.0,
            close
        ));
    }
    fs::write(dir.join(format!("{}.csv", symbol)), content).unwrap();
}
