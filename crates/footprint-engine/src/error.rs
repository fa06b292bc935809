//! 计算引擎错误类型

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("invalid report period: month={month}, year={year}")]
    InvalidPeriod { month: u32, year: i32 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// 统计窗口最长十年
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// 统计窗口天数必须在 `1..=MAX_WINDOW_DAYS` 内
pub fn check_days(days: i64) -> Result<i64> {
    if !(1..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(EngineError::InvalidArgument(format!(
            "days must be between 1 and {MAX_WINDOW_DAYS}, got {days}"
        )));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_days() {
        assert_eq!(check_days(30), Ok(30));
        assert!(matches!(check_days(0), Err(EngineError::InvalidArgument(_))));
        assert!(check_days(-7).is_err());
        assert_eq!(check_days(MAX_WINDOW_DAYS), Ok(MAX_WINDOW_DAYS));
        assert!(check_days(MAX_WINDOW_DAYS + 1).is_err());
        assert!(check_days(1_000_000_000).is_err());
        assert!(check_days(i64::MAX).is_err());
    }
}
