//! 排放量的现实等价换算
//!
//! 将 kg CO₂ 换算为驾车里程、植树数量、孟加拉人均排放天数等直观指标。

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{LogEntry, days_before, total_kg};
use crate::rounding::round_to;

pub const CAR_KG_PER_KM: f64 = 0.171;
pub const TREE_KG_PER_YEAR: f64 = 22.0;
pub const BANGLADESHI_DAILY_KG: f64 = 4.5;
pub const BANGLADESHI_MONTHLY_KG: f64 = 135.0;
pub const GLOBAL_DAILY_KG: f64 = 12.3;
pub const GLOBAL_MONTHLY_KG: f64 = 369.0;
pub const RICKSHAW_KG_PER_KM: f64 = 0.015;
pub const AUTO_RICKSHAW_KG_PER_KM: f64 = 0.080;
pub const RICE_KG_PER_KG: f64 = 4.0;
pub const FAN_KG_PER_HOUR: f64 = 0.033;
pub const AC_KG_PER_HOUR: f64 = 0.78;
/// 家庭日均用电排放（月均 20 kg）
pub const HOUSEHOLD_DAILY_KG: f64 = 20.0 / 30.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Equivalents {
    pub car_km: f64,
    pub trees_needed: f64,
    pub bangladeshi_days: f64,
    pub household_days: f64,
    pub rickshaw_rides_km: f64,
    pub auto_rickshaw_km: f64,
    pub rice_kg: f64,
    pub fan_hours: f64,
    pub ac_hours: f64,
    pub global_days: f64,
    pub bangladeshi_average_monthly: f64,
}

impl Equivalents {
    pub fn of(carbon_kg: f64) -> Self {
        let per = |unit: f64| round_to(carbon_kg / unit, 2);
        Self {
            car_km: per(CAR_KG_PER_KM),
            trees_needed: per(TREE_KG_PER_YEAR),
            bangladeshi_days: per(BANGLADESHI_DAILY_KG),
            household_days: per(HOUSEHOLD_DAILY_KG),
            rickshaw_rides_km: per(RICKSHAW_KG_PER_KM),
            auto_rickshaw_km: per(AUTO_RICKSHAW_KG_PER_KM),
            rice_kg: per(RICE_KG_PER_KG),
            fan_hours: per(FAN_KG_PER_HOUR),
            ac_hours: per(AC_KG_PER_HOUR),
            global_days: per(GLOBAL_DAILY_KG),
            bangladeshi_average_monthly: BANGLADESHI_MONTHLY_KG,
        }
    }
}

/// 面向用户的一句话影响描述
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImpactStory {
    Reduction {
        carbon_kg: f64,
        reduction_kg: f64,
        equivalents: Equivalents,
        story: String,
    },
    Current {
        carbon_kg: f64,
        equivalents: Equivalents,
        story: String,
    },
}

impl ImpactStory {
    pub fn new(carbon_kg: f64, reduction_kg: f64) -> Self {
        if reduction_kg > 0.0 {
            let equivalents = Equivalents::of(reduction_kg);
            let story = format!(
                "By reducing {:.1} kg this month, you saved the equivalent of planting {:.1} mango trees!",
                reduction_kg, equivalents.trees_needed
            );
            Self::Reduction {
                carbon_kg: round_to(carbon_kg, 2),
                reduction_kg: round_to(reduction_kg, 2),
                equivalents,
                story,
            }
        } else {
            let equivalents = Equivalents::of(carbon_kg);
            let story = format!(
                "Your {:.1} kg CO₂ equals driving a car for {:.0} km",
                carbon_kg, equivalents.car_km
            );
            Self::Current {
                carbon_kg: round_to(carbon_kg, 2),
                equivalents,
                story,
            }
        }
    }

    pub fn story(&self) -> &str {
        match self {
            Self::Reduction { story, .. } | Self::Current { story, .. } => story,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Comparison {
    pub your_monthly_kg: f64,
    pub bangladeshi_avg_monthly: f64,
    pub global_avg_monthly: f64,
    pub vs_bangladeshi_percent: f64,
    pub vs_global_percent: f64,
    pub is_below_bangladeshi_avg: bool,
    pub is_below_global_avg: bool,
}

/// 个人影响汇总
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserImpact {
    pub total_kg: f64,
    pub period_days: i64,
    pub equivalents: Equivalents,
    pub impact_story: ImpactStory,
    pub comparison: Comparison,
}

impl UserImpact {
    /// 统计 `[now - days, now]` 内的记录
    pub fn compute(logs: &[LogEntry], days: i64, now: DateTime<Utc>) -> Self {
        let start = days_before(now, days);
        let total = total_kg(
            logs.iter()
                .filter(|l| l.created_at >= start && l.created_at <= now),
        );

        let monthly = if days > 0 {
            total * 30.0 / days as f64
        } else {
            0.0
        };

        Self {
            total_kg: round_to(total, 2),
            period_days: days,
            equivalents: Equivalents::of(total),
            impact_story: ImpactStory::new(total, 0.0),
            comparison: Comparison {
                your_monthly_kg: round_to(monthly, 2),
                bangladeshi_avg_monthly: BANGLADESHI_MONTHLY_KG,
                global_avg_monthly: GLOBAL_MONTHLY_KG,
                vs_bangladeshi_percent: round_to(monthly / BANGLADESHI_MONTHLY_KG * 100.0, 1),
                vs_global_percent: round_to(monthly / GLOBAL_MONTHLY_KG * 100.0, 1),
                is_below_bangladeshi_avg: monthly < BANGLADESHI_MONTHLY_KG,
                is_below_global_avg: monthly < GLOBAL_MONTHLY_KG,
            },
        }
    }
}

/// 全体用户影响汇总
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommunityImpact {
    pub total_kg: f64,
    pub total_users: i64,
    pub average_per_user: f64,
    pub period_days: i64,
    pub equivalents: Equivalents,
    pub message: String,
}

impl CommunityImpact {
    pub fn compute(total_kg: f64, total_users: i64, days: i64) -> Self {
        let average = if total_users > 0 {
            total_kg / total_users as f64
        } else {
            0.0
        };
        let equivalents = Equivalents::of(total_kg);
        let message = format!(
            "Together, all users have emitted {:.0} kg CO₂ this month. That's equivalent to planting {:.0} trees!",
            total_kg, equivalents.trees_needed
        );

        Self {
            total_kg: round_to(total_kg, 2),
            total_users,
            average_per_user: round_to(average, 2),
            period_days: days,
            equivalents,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_equivalents() {
        let eq = Equivalents::of(17.1);
        assert_eq!(eq.car_km, 100.0);
        assert_eq!(eq.trees_needed, 0.78);
        assert_eq!(eq.bangladeshi_days, 3.8);
        assert_eq!(eq.bangladeshi_average_monthly, 135.0);

        let eq = Equivalents::of(0.0);
        assert_eq!(eq.household_days, 0.0);
    }

    #[test]
    fn test_story_current() {
        let story = ImpactStory::new(17.1, 0.0);
        assert_eq!(story.story(), "Your 17.1 kg CO₂ equals driving a car for 100 km");
        let json = serde_json::to_value(&story).unwrap();
        assert_eq!(json["type"], "current");
    }

    #[test]
    fn test_story_reduction() {
        let story = ImpactStory::new(100.0, 44.0);
        assert_eq!(
            story.story(),
            "By reducing 44.0 kg this month, you saved the equivalent of planting 2.0 mango trees!"
        );
        let json = serde_json::to_value(&story).unwrap();
        assert_eq!(json["type"], "reduction");
        assert_eq!(json["reduction_kg"], 44.0);
    }

    #[test]
    fn test_user_impact_window_and_comparison() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
        let logs = vec![
            LogEntry::new("transport", "car", 90.0, now - Duration::days(5)),
            LogEntry::new("transport", "car", 1000.0, now - Duration::days(40)),
            LogEntry::new("transport", "car", 1000.0, now + Duration::days(1)),
        ];
        let impact = UserImpact::compute(&logs, 30, now);
        assert_eq!(impact.total_kg, 90.0);
        assert_eq!(impact.comparison.your_monthly_kg, 90.0);
        assert_eq!(impact.comparison.vs_bangladeshi_percent, 66.7);
        assert!(impact.comparison.is_below_bangladeshi_avg);
        assert!(impact.comparison.is_below_global_avg);
    }

    #[test]
    fn test_community_impact() {
        let c = CommunityImpact::compute(2200.0, 4, 30);
        assert_eq!(c.average_per_user, 550.0);
        assert_eq!(
            c.message,
            "Together, all users have emitted 2200 kg CO₂ this month. That's equivalent to planting 100 trees!"
        );

        let empty = CommunityImpact::compute(0.0, 0, 30);
        assert_eq!(empty.average_per_user, 0.0);
    }

    #[test]
    fn test_user_impact_huge_window() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let logs = vec![LogEntry::new("transport", "car", 12.0, now - Duration::days(400))];

        let impact = UserImpact::compute(&logs, i64::MAX, now);
        assert_eq!(impact.total_kg, 12.0);
        assert_eq!(impact.period_days, i64::MAX);
    }
}
