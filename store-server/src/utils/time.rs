//! 时间工具函数 — 本地时区转换
//!
//! 所有日期→时间戳转换统一在 handler 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{Datelike, Local, Months, NaiveDate};

/// 今天的日期 (服务器本地时区)
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 订单号中的日期段 (YYYYMMDD)
pub fn date_code(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// 统计聚合使用的月份键 (YYYY-MM)
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// 日期 00:00:00 → Unix millis (本地时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn day_start_millis(date: NaiveDate) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    naive
        .and_local_timezone(Local)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期结束 → 次日 00:00:00 的 Unix millis (本地时区)
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day)
}

/// 当月第一天 00:00:00 → Unix millis (本地时区)
pub fn month_start_millis(date: NaiveDate) -> i64 {
    day_start_millis(first_of_month(date))
}

/// 当月第一天
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// 往前推 N 个月 (月末自动收缩，如 3-31 往前 1 个月 → 2-29/2-28)
pub fn shift_months_back(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_code_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date_code(date), "20240305");
    }

    #[test]
    fn test_month_key_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(month_key(date), "2024-03");
    }

    #[test]
    fn test_day_bounds_are_adjacent() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let start = day_start_millis(date);
        let end = day_end_millis(date);
        assert!(start < end);
        assert_eq!(end, day_start_millis(date.succ_opt().unwrap()));
    }

    #[test]
    fn test_shift_months_back_clamps_month_end() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let shifted = shift_months_back(date, 1);
        assert_eq!(shifted, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(month_key(shifted), "2024-02");
    }

    #[test]
    fn test_shift_months_back_full_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let shifted = shift_months_back(date, 12);
        assert_eq!(shifted, NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
    }

    #[test]
    fn test_first_of_month() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(
            first_of_month(date),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }
}
