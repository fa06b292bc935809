//! 基于规则表的减排建议
//!
//! 先按 (类别, 活动) 精确匹配，未命中时退回类别级通用建议，最后使用默认建议。

mod rules;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::models::{LogEntry, days_before, total_kg};
use crate::rounding::round_to;

pub use rules::DAILY_TIPS;

/// 建议的减排力度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionImpact {
    High,
    Medium,
    Low,
}

/// 单条建议
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Suggestion {
    pub action: &'static str,
    pub description: &'static str,
    pub impact: SuggestionImpact,
    pub icon: &'static str,
    pub points: i32,
}

/// 一组建议及其标题
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionRule {
    pub title: &'static str,
    pub description: &'static str,
    pub suggestions: &'static [Suggestion],
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryAnalysis {
    pub category: String,
    pub total_kg: f64,
    pub average_per_entry: f64,
    pub entry_count: usize,
    pub percentage_of_total: f64,
}

/// 针对单条记录生成的建议
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeneratedSuggestions {
    pub title: &'static str,
    pub description: &'static str,
    pub suggestions: &'static [Suggestion],
    pub category_analysis: Option<CategoryAnalysis>,
    pub encouragement: &'static str,
    pub daily_tip: &'static str,
}

/// 用户近期记录的综合建议
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserSuggestions {
    pub suggestions: Vec<GeneratedSuggestions>,
    pub daily_tip: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_logs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_analyzed: Option<i64>,
}

/// 随机的每日小贴士
pub fn daily_tip() -> &'static str {
    daily_tip_with(&mut rand::rng())
}

pub fn daily_tip_with<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    DAILY_TIPS.choose(rng).copied().unwrap_or(DAILY_TIPS[0])
}

/// 查找适用的规则
pub fn rule_for(category: &str, activity: &str) -> SuggestionRule {
    rules::ACTIVITY_RULES
        .iter()
        .find(|(c, a, _)| *c == category && *a == activity)
        .map(|(_, _, rule)| *rule)
        .or_else(|| {
            rules::CATEGORY_RULES
                .iter()
                .find(|(c, _)| *c == category)
                .map(|(_, rule)| *rule)
        })
        .unwrap_or(rules::DEFAULT_RULE)
}

fn encouragement(carbon_amount_kg: f64) -> &'static str {
    if carbon_amount_kg < 1.0 {
        "🌱 Great job! Your emissions are low. Keep up the eco-friendly habits!"
    } else if carbon_amount_kg < 5.0 {
        "👍 You're making progress! Small changes add up to big impact."
    } else if carbon_amount_kg < 10.0 {
        "💪 Every step counts! Consider trying some of the suggestions above."
    } else {
        "🌟 Tracking your emissions is the first step! Use these suggestions to reduce your footprint."
    }
}

fn analyze_category(logs: &[LogEntry], category: &str) -> Option<CategoryAnalysis> {
    let in_category: Vec<&LogEntry> = logs.iter().filter(|l| l.category == category).collect();
    if in_category.is_empty() {
        return None;
    }

    let total = total_kg(in_category.iter().copied());
    let total_all = total_kg(logs);
    let percentage = if total_all > 0.0 {
        total / total_all * 100.0
    } else {
        0.0
    };

    Some(CategoryAnalysis {
        category: category.to_string(),
        total_kg: round_to(total, 2),
        average_per_entry: round_to(total / in_category.len() as f64, 2),
        entry_count: in_category.len(),
        percentage_of_total: round_to(percentage, 1),
    })
}

/// 为一条记录生成建议
///
/// `recent_logs` 为空时不做类别分析。
pub fn generate_suggestions(log: &LogEntry, recent_logs: &[LogEntry]) -> GeneratedSuggestions {
    generate_with_tip(log, recent_logs, daily_tip())
}

fn generate_with_tip(
    log: &LogEntry,
    recent_logs: &[LogEntry],
    daily_tip: &'static str,
) -> GeneratedSuggestions {
    let rule = rule_for(&log.category, &log.activity);
    GeneratedSuggestions {
        title: rule.title,
        description: rule.description,
        suggestions: rule.suggestions,
        category_analysis: analyze_category(recent_logs, &log.category),
        encouragement: encouragement(log.carbon_amount_kg),
        daily_tip,
    }
}

/// 汇总用户最近 `days` 天的记录，按类别排放量降序给出建议
pub fn user_suggestions(
    logs: &[LogEntry],
    limit: usize,
    days: i64,
    now: DateTime<Utc>,
) -> UserSuggestions {
    let cutoff = days_before(now, days);
    let mut recent: Vec<LogEntry> = logs
        .iter()
        .filter(|l| l.created_at >= cutoff)
        .cloned()
        .collect();

    if recent.is_empty() {
        return UserSuggestions {
            suggestions: Vec::new(),
            daily_tip: daily_tip(),
            message: Some("Start tracking your carbon footprint to get personalized suggestions!"),
            total_logs: None,
            days_analyzed: None,
        };
    }

    // 最新优先，类别按首次出现顺序
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let mut latest: Vec<&LogEntry> = Vec::new();
    for log in &recent {
        if !latest.iter().any(|l| l.category == log.category) {
            latest.push(log);
        }
    }

    let mut suggestions: Vec<GeneratedSuggestions> = latest
        .into_iter()
        .map(|log| generate_suggestions(log, &recent))
        .collect();

    let total_of = |s: &GeneratedSuggestions| {
        s.category_analysis
            .as_ref()
            .map(|a| a.total_kg)
            .unwrap_or(0.0)
    };
    suggestions.sort_by(|a, b| total_of(b).total_cmp(&total_of(a)));
    suggestions.truncate(limit);

    UserSuggestions {
        suggestions,
        daily_tip: daily_tip(),
        message: None,
        total_logs: Some(recent.len()),
        days_analyzed: Some(days),
    }
}
