//! 时间工具函数: 业务时区转换
//!
//! 会员日期都是纯日历日期 (`NaiveDate`)。"今天" 只在 API handler 层
//! 按业务时区求值，membership 层始终接收显式的 `as_of`。

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 业务时区的今天
pub fn today_in(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// 可选的 `as_of` 查询参数，缺省时取业务时区的今天
pub fn resolve_as_of(as_of: Option<&str>, tz: Tz) -> AppResult<NaiveDate> {
    match as_of.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_date(raw),
        None => Ok(today_in(tz)),
    }
}

/// 解析 IANA 时区名，失败返回 UTC
pub fn parse_timezone(name: &str) -> Tz {
    name.trim().parse::<Tz>().unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse business timezone '{}': {}, falling back to UTC",
            name,
            e
        );
        Tz::UTC
    })
}
