//! 输入验证工具函数
//!
//! 所有校验在任何修改之前执行，失败时直接返回对应错误

use std::path::Path;

use chrono::NaiveDate;

use crate::calendar::WorkingDayPolicy;
use crate::error::{NachweisError, NachweisResult};

pub(crate) const PATH_MAY_NOT_BE_EMPTY: &str = "Path may not be null or empty.";

/// 验证字符串非空白，返回去除首尾空白后的值
///
/// # 参数
/// - `field`: 字段名，用于错误信息
/// - `value`: 待验证的值
pub fn require_text(field: &str, value: &str) -> NachweisResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NachweisError::invalid_argument(format!(
            "{} may not be null or empty.",
            field
        )));
    }
    Ok(trimmed.to_string())
}

/// 验证路径非空白
pub fn require_path(path: &Path) -> NachweisResult<()> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(NachweisError::invalid_argument(PATH_MAY_NOT_BE_EMPTY));
    }
    Ok(())
}

/// 验证区间：首尾均为工作日，且结束不早于开始
pub fn require_working_range(
    policy: &dyn WorkingDayPolicy,
    begin: NaiveDate,
    end: NaiveDate,
) -> NachweisResult<()> {
    if !policy.is_working_day(begin) {
        return Err(NachweisError::illegal_date(format!(
            "begin {} is not a working day",
            begin
        )));
    }
    if !policy.is_working_day(end) {
        return Err(NachweisError::illegal_date(format!(
            "end {} is not a working day",
            end
        )));
    }
    if end < begin {
        return Err(NachweisError::illegal_date(format!(
            "end {} is before begin {}",
            end, begin
        )));
    }
    Ok(())
}
