//! 积分、等级与环保评分

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{LogEntry, total_kg};
use crate::rounding::round_to;

/// 无记录时的默认评分
pub const DEFAULT_ECO_SCORE: f64 = 50.0;

/// 用户游戏化统计
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_points: i32,
    pub level: i32,
    pub eco_score: f64,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_points: 0,
            level: 1,
            eco_score: 0.0,
        }
    }
}

/// 按日均排放计算环保评分（0-100）
///
/// 近 7 天记录不少于 7 条时额外奖励 5 分。
pub fn calculate_eco_score(logs: &[LogEntry], now: DateTime<Utc>) -> f64 {
    if logs.is_empty() {
        return DEFAULT_ECO_SCORE;
    }

    let days: HashSet<_> = logs.iter().map(LogEntry::date).collect();
    let daily_avg = total_kg(logs) / days.len() as f64;

    let mut score = if daily_avg <= 10.0 {
        95.0
    } else if daily_avg <= 20.0 {
        85.0
    } else if daily_avg <= 30.0 {
        75.0
    } else if daily_avg <= 40.0 {
        65.0
    } else if daily_avg <= 50.0 {
        50.0
    } else {
        40.0
    };

    let week_ago = now - Duration::days(7);
    let recent = logs.iter().filter(|l| l.created_at >= week_ago).count();
    if recent >= 7 {
        score += 5.0;
    }

    f64::min(score, 100.0)
}

/// 单条记录奖励的积分
pub fn award_points_for_log(carbon_amount_kg: f64, category: &str) -> i32 {
    let mut points = 10;

    if carbon_amount_kg > 5.0 {
        points += 5;
    } else if carbon_amount_kg > 2.0 {
        points += 2;
    }

    points += match category {
        "transport" => 15,
        "diet" => 12,
        "energy" => 10,
        "shopping" => 8,
        "lifestyle" => 5,
        "other" => 3,
        _ => 5,
    };

    points
}

/// 每 100 积分升一级
pub fn calculate_level(total_points: i32) -> i32 {
    (total_points / 100 + 1).max(1)
}

/// 新记录入库后重新计算统计
///
/// `logs` 为该用户的全部记录（含新记录）。
pub fn apply_log(stats: UserStats, points: i32, logs: &[LogEntry], now: DateTime<Utc>) -> UserStats {
    let total_points = stats.total_points.saturating_add(points);
    UserStats {
        total_points,
        level: calculate_level(total_points),
        eco_score: round_to(calculate_eco_score(logs, now), 1),
    }
}
