//! 周报、月报与趋势分析
//!
//! 输入为用户的记录切片，窗口边界均为左闭右开的 UTC 时间区间。

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::models::{LogEntry, days_after, days_before, total_kg};
use crate::rounding::round_to;

/// 排放走势
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BiggestSource {
    pub category: String,
    pub kg: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyReport {
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub total_kg: f64,
    pub previous_week_kg: f64,
    pub percent_change: f64,
    pub is_better: bool,
    pub by_category: BTreeMap<String, f64>,
    pub biggest_source: BiggestSource,
    pub top_tip: String,
    pub daily_breakdown: BTreeMap<String, f64>,
    pub total_entries: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    pub month_start: DateTime<Utc>,
    pub month_end: DateTime<Utc>,
    pub total_kg: f64,
    pub previous_month_kg: f64,
    pub percent_change: f64,
    pub is_better: bool,
    pub by_category: BTreeMap<String, f64>,
    pub average_per_day: f64,
    pub weekly_breakdown: BTreeMap<String, f64>,
    pub trend_direction: Trend,
    pub total_entries: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendAnalysis {
    pub trend: Trend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub daily_average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_days: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_breakdown: Option<BTreeMap<String, f64>>,
}

// ==================== 内部工具 ====================

fn in_window<'a>(
    logs: &'a [LogEntry],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> impl Iterator<Item = &'a LogEntry> + 'a {
    logs.iter()
        .filter(move |l| l.created_at >= start && l.created_at < end)
}

/// 按类别汇总，保持首次出现的顺序
fn group_by_category<'a>(logs: impl IntoIterator<Item = &'a LogEntry>) -> Vec<(String, f64)> {
    let mut groups: Vec<(String, f64)> = Vec::new();
    for log in logs {
        match groups.iter_mut().find(|(c, _)| *c == log.category) {
            Some((_, kg)) => *kg += log.carbon_amount_kg,
            None => groups.push((log.category.clone(), log.carbon_amount_kg)),
        }
    }
    groups
}

fn rounded_map(groups: impl IntoIterator<Item = (String, f64)>) -> BTreeMap<String, f64> {
    groups.into_iter().map(|(k, v)| (k, round_to(v, 2))).collect()
}

/// 与上期对比：上期为 0 时视为变好且变化为 0
fn compare(current: f64, previous: f64) -> (f64, bool) {
    if previous > 0.0 {
        ((current - previous) / previous * 100.0, current < previous)
    } else {
        (0.0, true)
    }
}

fn top_tip(category: &str) -> &'static str {
    match category {
        "transport" => "Try walking for trips under 2 km - it's free and healthy!",
        "diet" => "Switch 3 meals/week to vegetarian to reduce food emissions by up to 50%!",
        "energy" => "Switch to LED bulbs - they use 75% less energy!",
        "shopping" => "Buy second-hand items when possible - extend product life!",
        "lifestyle" => "Take shorter showers - cutting 2 minutes saves water and energy!",
        _ => "Track your emissions regularly to identify reduction opportunities!",
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// 当前所在周的周一 00:00 UTC
pub fn current_week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    midnight(monday)
}

fn month_bounds(year: i32, month: u32) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let invalid = || EngineError::InvalidPeriod { month, year };
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(ny, nm, 1).ok_or_else(invalid)?;
    Ok((midnight(start), midnight(end)))
}

// ==================== 报表 ====================

/// 生成周报
///
/// `week_start` 缺省为 `now` 所在周的周一零点。
pub fn weekly_report(
    logs: &[LogEntry],
    week_start: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> WeeklyReport {
    let start = week_start.unwrap_or_else(|| current_week_start(now));
    let end = days_after(start, 7);
    let prev_start = days_before(start, 7);

    let week: Vec<&LogEntry> = in_window(logs, start, end).collect();
    let week_total = total_kg(week.iter().copied());
    let prev_total = total_kg(in_window(logs, prev_start, start));
    let (percent_change, is_better) = compare(week_total, prev_total);

    let groups = group_by_category(week.iter().copied());
    let (big_cat, big_kg) = groups
        .iter()
        .fold(None::<&(String, f64)>, |best, g| match best {
            Some(b) if b.1 >= g.1 => Some(b),
            _ => Some(g),
        })
        .map(|(c, k)| (c.clone(), *k))
        .unwrap_or_default();
    let big_pct = if week_total > 0.0 {
        big_kg / week_total * 100.0
    } else {
        0.0
    };

    let mut daily: BTreeMap<String, f64> = BTreeMap::new();
    for log in &week {
        *daily.entry(log.date().to_string()).or_default() += log.carbon_amount_kg;
    }

    WeeklyReport {
        week_start: start,
        week_end: end,
        total_kg: round_to(week_total, 2),
        previous_week_kg: round_to(prev_total, 2),
        percent_change: round_to(percent_change, 1),
        is_better,
        top_tip: top_tip(&big_cat).to_string(),
        by_category: rounded_map(groups),
        biggest_source: BiggestSource {
            category: big_cat,
            kg: round_to(big_kg, 2),
            percentage: round_to(big_pct, 1),
        },
        daily_breakdown: rounded_map(daily),
        total_entries: week.len(),
    }
}

/// 生成月报
///
/// 月份与年份缺省取 `now` 所在月；非法月份返回 [`EngineError::InvalidPeriod`]。
pub fn monthly_report(
    logs: &[LogEntry],
    month: Option<u32>,
    year: Option<i32>,
    now: DateTime<Utc>,
) -> Result<MonthlyReport> {
    let month = month.unwrap_or_else(|| now.month());
    let year = year.unwrap_or_else(|| now.year());

    let (start, end) = month_bounds(year, month)?;
    let (prev_start, prev_end) = if month == 1 {
        month_bounds(year - 1, 12)?
    } else {
        month_bounds(year, month - 1)?
    };

    let current: Vec<&LogEntry> = in_window(logs, start, end).collect();
    let month_total = total_kg(current.iter().copied());
    let prev_total = total_kg(in_window(logs, prev_start, prev_end));
    let (percent_change, is_better) = compare(month_total, prev_total);

    let mut weekly: BTreeMap<String, f64> = BTreeMap::new();
    for log in &current {
        let week_num = (log.created_at.day() - 1) / 7 + 1;
        *weekly.entry(format!("Week {week_num}")).or_default() += log.carbon_amount_kg;
    }

    // 周键按字典序比较首尾两周
    let trend_direction = match (weekly.values().next(), weekly.values().next_back()) {
        (Some(first), Some(last)) if weekly.len() >= 2 => {
            if last < first {
                Trend::Down
            } else if last > first {
                Trend::Up
            } else {
                Trend::Stable
            }
        }
        _ => Trend::Stable,
    };

    let days_in_month = (end - start).num_days();
    let average_per_day = if days_in_month > 0 {
        month_total / days_in_month as f64
    } else {
        0.0
    };

    Ok(MonthlyReport {
        month,
        year,
        month_start: start,
        month_end: end,
        total_kg: round_to(month_total, 2),
        previous_month_kg: round_to(prev_total, 2),
        percent_change: round_to(percent_change, 1),
        is_better,
        by_category: rounded_map(group_by_category(current.iter().copied())),
        average_per_day: round_to(average_per_day, 2),
        weekly_breakdown: rounded_map(weekly),
        trend_direction,
        total_entries: current.len(),
    })
}

/// 最近 `days` 天的每日排放趋势
pub fn trend_analysis(logs: &[LogEntry], days: i64, now: DateTime<Utc>) -> TrendAnalysis {
    let cutoff = days_before(now, days);

    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for log in logs.iter().filter(|l| l.created_at >= cutoff) {
        *daily.entry(log.date()).or_default() += log.carbon_amount_kg;
    }

    if daily.is_empty() {
        return TrendAnalysis {
            trend: Trend::Stable,
            message: Some("Not enough data for trend analysis".to_string()),
            daily_average: 0.0,
            total_days: None,
            total_kg: None,
            daily_breakdown: None,
        };
    }

    let values: Vec<f64> = daily.values().copied().collect();
    let trend = if values.len() >= 7 {
        let first_week = values[..7].iter().sum::<f64>() / 7.0;
        let last_week = values[values.len() - 7..].iter().sum::<f64>() / 7.0;
        if last_week < first_week * 0.9 {
            Trend::Down
        } else if last_week > first_week * 1.1 {
            Trend::Up
        } else {
            Trend::Stable
        }
    } else {
        Trend::Stable
    };

    let total: f64 = values.iter().sum();
    TrendAnalysis {
        trend,
        message: None,
        daily_average: round_to(total / values.len() as f64, 2),
        total_days: Some(values.len()),
        total_kg: Some(round_to(total, 2)),
        daily_breakdown: Some(
            daily
                .into_iter()
                .map(|(d, v)| (d.to_string(), round_to(v, 2)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_current_week_start_is_monday_midnight() {
        // 2024-06-15 是周六
        assert_eq!(current_week_start(at(2024, 6, 15, 18)), at(2024, 6, 10, 0));
        assert_eq!(current_week_start(at(2024, 6, 10, 0)), at(2024, 6, 10, 0));
    }

    #[test]
    fn test_weekly_report_comparison_and_biggest_source() {
        let now = at(2024, 6, 15, 12);
        let logs = vec![
            LogEntry::new("transport", "car", 10.0, at(2024, 6, 10, 8)),
            LogEntry::new("diet", "beef", 30.0, at(2024, 6, 11, 8)),
            LogEntry::new("transport", "car", 10.0, at(2024, 6, 11, 9)),
            // 上周
            LogEntry::new("energy", "coal", 100.0, at(2024, 6, 5, 8)),
            // 下周，不计入
            LogEntry::new("energy", "coal", 100.0, at(2024, 6, 17, 0)),
        ];
        let r = weekly_report(&logs, None, now);
        assert_eq!(r.total_kg, 50.0);
        assert_eq!(r.previous_week_kg, 100.0);
        assert_eq!(r.percent_change, -50.0);
        assert!(r.is_better);
        assert_eq!(r.biggest_source.category, "diet");
        assert_eq!(r.biggest_source.percentage, 60.0);
        assert_eq!(r.top_tip, top_tip("diet"));
        assert_eq!(r.by_category["transport"], 20.0);
        assert_eq!(r.daily_breakdown["2024-06-11"], 40.0);
        assert_eq!(r.total_entries, 3);
    }

    #[test]
    fn test_weekly_report_empty() {
        let r = weekly_report(&[], None, at(2024, 6, 15, 12));
        assert_eq!(r.total_kg, 0.0);
        assert_eq!(r.percent_change, 0.0);
        assert!(r.is_better);
        assert_eq!(r.biggest_source.category, "");
        assert_eq!(
            r.top_tip,
            "Track your emissions regularly to identify reduction opportunities!"
        );
    }

    #[test]
    fn test_weekly_biggest_source_tie_keeps_first_seen() {
        let logs = vec![
            LogEntry::new("shopping", "jeans", 5.0, at(2024, 6, 10, 1)),
            LogEntry::new("diet", "rice", 5.0, at(2024, 6, 10, 2)),
        ];
        let r = weekly_report(&logs, Some(at(2024, 6, 10, 0)), at(2024, 6, 15, 0));
        assert_eq!(r.biggest_source.category, "shopping");
    }

    #[test]
    fn test_monthly_report_wraps_january() {
        let logs = vec![
            LogEntry::new("diet", "rice", 31.0, at(2024, 1, 3, 0)),
            LogEntry::new("diet", "rice", 62.0, at(2023, 12, 20, 0)),
        ];
        let r = monthly_report(&logs, Some(1), Some(2024), at(2024, 6, 1, 0)).unwrap();
        assert_eq!(r.total_kg, 31.0);
        assert_eq!(r.previous_month_kg, 62.0);
        assert_eq!(r.percent_change, -50.0);
        assert_eq!(r.average_per_day, 1.0);
        assert_eq!(r.month_end, at(2024, 2, 1, 0));
        assert_eq!(r.trend_direction, Trend::Stable);
    }

    #[test]
    fn test_monthly_report_december_and_weekly_trend() {
        let logs = vec![
            LogEntry::new("energy", "coal", 10.0, at(2024, 12, 2, 0)),
            LogEntry::new("energy", "coal", 4.0, at(2024, 12, 30, 0)),
        ];
        let r = monthly_report(&logs, Some(12), Some(2024), at(2024, 12, 31, 0)).unwrap();
        assert_eq!(r.month_end, at(2025, 1, 1, 0));
        assert_eq!(r.weekly_breakdown["Week 1"], 10.0);
        assert_eq!(r.weekly_breakdown["Week 5"], 4.0);
        assert_eq!(r.trend_direction, Trend::Down);
    }

    #[test]
    fn test_monthly_report_defaults_and_invalid_month() {
        let r = monthly_report(&[], None, None, at(2024, 2, 10, 0)).unwrap();
        assert_eq!((r.month, r.year), (2, 2024));
        assert_eq!(r.average_per_day, 0.0);

        let err = monthly_report(&[], Some(13), Some(2024), at(2024, 2, 10, 0)).unwrap_err();
        assert_eq!(err, EngineError::InvalidPeriod { month: 13, year: 2024 });
    }

    #[test]
    fn test_trend_analysis_no_data() {
        let t = trend_analysis(&[], 30, at(2024, 6, 30, 0));
        assert_eq!(t.trend, Trend::Stable);
        assert_eq!(t.message.as_deref(), Some("Not enough data for trend analysis"));
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("total_days").is_none());
    }

    #[test]
    fn test_trend_analysis_down() {
        let now = at(2024, 6, 30, 12);
        let logs: Vec<_> = (1..=14)
            .map(|i| {
                let kg = if i <= 7 { 10.0 } else { 5.0 };
                LogEntry::new("transport", "car", kg, at(2024, 6, i, 8))
            })
            .collect();
        let t = trend_analysis(&logs, 30, now);
        assert_eq!(t.trend, Trend::Down);
        assert_eq!(t.total_days, Some(14));
        assert_eq!(t.total_kg, Some(105.0));
        assert_eq!(t.daily_average, 7.5);
    }

    #[test]
    fn test_trend_analysis_fewer_than_seven_days_is_stable() {
        let now = at(2024, 6, 30, 12);
        let logs = vec![
            LogEntry::new("transport", "car", 1.0, at(2024, 6, 28, 8)),
            LogEntry::new("transport", "car", 100.0, at(2024, 6, 29, 8)),
        ];
        assert_eq!(trend_analysis(&logs, 30, now).trend, Trend::Stable);
    }

    #[test]
    fn test_huge_windows_do_not_overflow() {
        let now = at(2024, 6, 15, 12);
        let logs = vec![LogEntry::new("diet", "beef", 4.0, at(2024, 6, 14, 8))];

        let trend = trend_analysis(&logs, 1_000_000_000, now);
        assert_eq!(trend.total_kg, Some(4.0));
        assert_eq!(trend_analysis(&[], i64::MAX, now).trend, Trend::Stable);

        let report = weekly_report(&logs, Some(DateTime::<Utc>::MIN_UTC), now);
        assert_eq!(report.total_kg, 0.0);
        assert_eq!(report.previous_week_kg, 0.0);
    }
}
