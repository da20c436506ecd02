// time_utils.rs
//
// 提供日線資料所需的時間轉換函數：
// 1. 價格表 `time` 欄（毫秒時間戳）與交易日之間的轉換
// 2. 圖表標籤與 CSV 日期欄的格式化與解析

use chrono::{DateTime, NaiveDate, NaiveTime};

/// 圖表與 CSV 使用的日期格式
pub const DATE_LABEL_FORMAT: &str = "%Y-%m-%d";

/// 將交易日轉換為當日 00:00 UTC 的毫秒時間戳
pub fn date_to_timestamp_ms(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// 將毫秒時間戳轉換為 UTC 交易日
pub fn timestamp_ms_to_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(ts).map(|dt| dt.date_naive())
}

/// 格式化為 `YYYY-MM-DD`
pub fn format_date_label(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

/// 解析日期欄位
///
/// 接受 `YYYY-MM-DD` 開頭的字串，後面的時間或時區部分會被忽略
/// （例如 `2024-01-02 00:00:00-05:00`）。
pub fn parse_date_label(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, DATE_LABEL_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_timestamp_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let ts = date_to_timestamp_ms(date);

        assert_eq!(ts % 86_400_000, 0);
        assert_eq!(timestamp_ms_to_date(ts), Some(date));
    }

    #[test]
    fn test_epoch() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_timestamp_ms(epoch), 0);
    }

    #[test]
    fn test_date_label_round_trip() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 4).unwrap();
        assert_eq!(format_date_label(date), "2023-07-04");
        assert_eq!(parse_date_label("2023-07-04"), Some(date));
    }

    #[test]
    fn test_parse_date_with_time_suffix() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(parse_date_label("2024-01-02 00:00:00-05:00"), Some(date));
        assert_eq!(parse_date_label(" 2024-01-02 "), Some(date));
        assert_eq!(parse_date_label("01/02/2024"), None);
        assert_eq!(parse_date_label(""), None);
    }
}
