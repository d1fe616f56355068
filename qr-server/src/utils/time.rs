//! 时间工具函数 - 营业日键

use chrono::{Local, NaiveDate};

/// 今天的营业日键 (本地时区, YYYY-MM-DD)
pub fn today_key() -> String {
    day_key(Local::now().date_naive())
}

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_key_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(day_key(date), "2026-03-07");
    }

    #[test]
    fn test_today_key_is_local_date() {
        let key = today_key();
        assert_eq!(key.len(), 10);
        assert!(NaiveDate::parse_from_str(&key, "%Y-%m-%d").is_ok());
    }
}
