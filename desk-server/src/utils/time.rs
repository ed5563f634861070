//! 时间工具函数 — 业务时区转换
//!
//! 资格校验按日历日比较（`NaiveDate`，业务时区），
//! repository 层只接收 `i64` Unix millis。

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 当前营业日 (业务时区的日历日)
pub fn today_in(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}
