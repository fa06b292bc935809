//! 计算引擎领域模型

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// 已知的排放类别
///
/// 日志中的类别是自由字符串，未知类别按"其他"处理，不会进入本枚举。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Transport,
    Diet,
    Energy,
    Shopping,
    Lifestyle,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Transport,
        Category::Diet,
        Category::Energy,
        Category::Shopping,
        Category::Lifestyle,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "transport" => Some(Self::Transport),
            "diet" => Some(Self::Diet),
            "energy" => Some(Self::Energy),
            "shopping" => Some(Self::Shopping),
            "lifestyle" => Some(Self::Lifestyle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Diet => "diet",
            Self::Energy => "energy",
            Self::Shopping => "shopping",
            Self::Lifestyle => "lifestyle",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一条碳排放记录
///
/// 引擎只关心聚合所需的字段；持久化层的 id、user_id、metadata 不在此处。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub category: String,
    pub activity: String,
    pub carbon_amount_kg: f64,
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(
        category: impl Into<String>,
        activity: impl Into<String>,
        carbon_amount_kg: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            category: category.into(),
            activity: activity.into(),
            carbon_amount_kg,
            created_at,
        }
    }

    /// 记录所在的 UTC 日期
    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// 汇总一组记录的排放量
pub fn total_kg<'a>(logs: impl IntoIterator<Item = &'a LogEntry>) -> f64 {
    logs.into_iter().map(|l| l.carbon_amount_kg).sum()
}

/// `now` 之前 `days` 天的时刻，超出可表示范围时取最早时刻
pub fn days_before(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(days)
        .and_then(|d| now.checked_sub_signed(d))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// `now` 之后 `days` 天的时刻，超出可表示范围时取最晚时刻
pub fn days_after(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(days)
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_category_parse_roundtrip() {
        for c in Category::ALL {
            assert_eq!(Category::parse(c.as_str()), Some(c));
        }
        assert_eq!(Category::parse("other"), None);
        assert_eq!(Category::parse("Transport"), None);
    }

    #[test]
    fn test_log_entry_date_is_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap();
        let log = LogEntry::new("diet", "rice", 1.0, ts);
        assert_eq!(log.date(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn test_total_kg() {
        let ts = Utc::now();
        let logs = vec![
            LogEntry::new("diet", "rice", 1.5, ts),
            LogEntry::new("energy", "coal", 2.25, ts),
        ];
        assert_eq!(total_kg(&logs), 3.75);
    }

    #[test]
    fn test_window_bounds_saturate() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(
            days_before(now, 7),
            Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap()
        );
        assert_eq!(
            days_after(now, 1),
            Utc.with_ymd_and_hms(2024, 3, 11, 12, 0, 0).unwrap()
        );
        assert_eq!(days_before(now, i64::MAX), DateTime::<Utc>::MIN_UTC);
        assert_eq!(days_before(now, 1_000_000_000), DateTime::<Utc>::MIN_UTC);
        assert_eq!(days_after(DateTime::<Utc>::MAX_UTC, 7), DateTime::<Utc>::MAX_UTC);
    }
}
