//! 碳排放记录服务
//!
//! 记录的写入、自动计算与积分结算，以及基于计算引擎的统计、报表与建议

use std::collections::BTreeMap;
use std::sync::Arc;

use carbon_shared::observability::metrics;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use footprint::report::{self, current_week_start};
use footprint::suggestion::{generate_suggestions, user_suggestions};
use footprint::{
    CommunityImpact, LogEntry, MonthlyReport, TrendAnalysis, UserImpact, UserSuggestions,
    WeeklyReport, calculate_from_metadata, check_days, days_before, gamification, round_to,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    CarbonLogCreated, CarbonStats, CreateCarbonLogRequest, LogListResponse, Pagination,
};
use crate::error::Result;
use crate::models::{NewCarbonLog, User};
use crate::repository::{AwardedLog, CarbonLogRepository};

/// 新记录生成建议时参考的天数
const SUGGESTION_WINDOW_DAYS: i64 = 30;

/// 日均排放按最近 30 天计算
const DAILY_AVERAGE_WINDOW_DAYS: i64 = 30;

pub struct CarbonService {
    logs: Arc<dyn CarbonLogRepository>,
}

impl CarbonService {
    pub fn new(logs: Arc<dyn CarbonLogRepository>) -> Self {
        Self { logs }
    }

    pub async fn list_logs(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<LogListResponse> {
        let (data, total) = futures::try_join!(
            self.logs.list_by_user(user_id, limit, offset),
            self.logs.count_by_user(user_id),
        )?;

        Ok(LogListResponse {
            success: true,
            data,
            pagination: Pagination {
                limit,
                offset,
                total,
            },
        })
    }

    /// 写入记录并结算积分
    ///
    /// 排放量为 0 且带有 metadata 时按排放因子自动计算。积分在仓储事务内基于数据库中的
    /// 当前值累加，不使用请求时加载的用户快照。
    #[instrument(skip(self, user, req), fields(user_id = %user.id, category = %req.category))]
    pub async fn create_log(
        &self,
        user: &User,
        req: CreateCarbonLogRequest,
        now: DateTime<Utc>,
    ) -> Result<CarbonLogCreated> {
        let carbon_amount_kg = resolve_amount(&req);
        let points = gamification::award_points_for_log(carbon_amount_kg, &req.category);

        let AwardedLog {
            log,
            stats,
            entries,
        } = self
            .logs
            .create_with_award(
                NewCarbonLog {
                    user_id: user.id,
                    category: req.category,
                    activity: req.activity,
                    carbon_amount_kg,
                    meta_data: req.metadata,
                },
                points,
                now,
            )
            .await?;

        metrics::record_carbon_log(&log.category, log.carbon_amount_kg);
        metrics::record_points_awarded(points);

        let cutoff = days_before(now, SUGGESTION_WINDOW_DAYS);
        let recent: Vec<LogEntry> = entries
            .into_iter()
            .filter(|l| l.created_at >= cutoff)
            .collect();
        let suggestions = generate_suggestions(&LogEntry::from(&log), &recent);

        info!(
            log_id = %log.id,
            carbon_kg = log.carbon_amount_kg,
            points,
            level = stats.level,
            "Carbon log created"
        );

        Ok(CarbonLogCreated {
            success: true,
            data: log,
            points_awarded: points,
            user_stats: stats,
            suggestions,
        })
    }

    pub async fn stats(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<CarbonStats> {
        let logs = self.logs.entries_by_user(user_id, None).await?;
        Ok(compute_stats(&logs, now))
    }

    pub async fn suggestions(
        &self,
        user_id: Uuid,
        limit: usize,
        days: i64,
        now: DateTime<Utc>,
    ) -> Result<UserSuggestions> {
        let days = check_days(days)?;
        let logs = self
            .logs
            .entries_by_user(user_id, Some(days_before(now, days)))
            .await?;
        Ok(user_suggestions(&logs, limit, days, now))
    }

    pub async fn weekly_report(
        &self,
        user_id: Uuid,
        week_start: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<WeeklyReport> {
        // 需要上一周的数据做对比
        let start = week_start.unwrap_or_else(|| current_week_start(now));
        let logs = self
            .logs
            .entries_by_user(user_id, Some(days_before(start, 7)))
            .await?;
        Ok(report::weekly_report(&logs, Some(start), now))
    }

    pub async fn monthly_report(
        &self,
        user_id: Uuid,
        month: Option<u32>,
        year: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<MonthlyReport> {
        let logs = self.logs.entries_by_user(user_id, None).await?;
        Ok(report::monthly_report(&logs, month, year, now)?)
    }

    pub async fn trends(&self, user_id: Uuid, days: i64, now: DateTime<Utc>) -> Result<TrendAnalysis> {
        let days = check_days(days)?;
        let logs = self
            .logs
            .entries_by_user(user_id, Some(days_before(now, days)))
            .await?;
        Ok(report::trend_analysis(&logs, days, now))
    }

    pub async fn impact(&self, user_id: Uuid, days: i64, now: DateTime<Utc>) -> Result<UserImpact> {
        let days = check_days(days)?;
        let logs = self
            .logs
            .entries_by_user(user_id, Some(days_before(now, days)))
            .await?;
        Ok(UserImpact::compute(&logs, days, now))
    }

    pub async fn community_impact(&self, days: i64, now: DateTime<Utc>) -> Result<CommunityImpact> {
        let days = check_days(days)?;
        let totals = self
            .logs
            .community_totals(days_before(now, days))
            .await?;
        Ok(CommunityImpact::compute(
            totals.total_kg,
            totals.active_users,
            days,
        ))
    }
}

/// 请求中未给出排放量时，尝试根据 metadata 计算
fn resolve_amount(req: &CreateCarbonLogRequest) -> f64 {
    if req.carbon_amount_kg != 0.0 {
        return req.carbon_amount_kg;
    }
    req.metadata
        .as_ref()
        .filter(|m| m.as_object().is_some_and(|o| !o.is_empty()))
        .and_then(|m| calculate_from_metadata(&req.category, &req.activity, m))
        .unwrap_or(req.carbon_amount_kg)
}

/// 个人统计：累计、近 30 天日均、本月累计与分类汇总
pub fn compute_stats(logs: &[LogEntry], now: DateTime<Utc>) -> CarbonStats {
    let total: f64 = logs.iter().map(|l| l.carbon_amount_kg).sum();

    let month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let monthly: f64 = logs
        .iter()
        .filter(|l| l.created_at >= month_start)
        .map(|l| l.carbon_amount_kg)
        .sum();

    let cutoff = days_before(now, DAILY_AVERAGE_WINDOW_DAYS);
    let recent: f64 = logs
        .iter()
        .filter(|l| l.created_at >= cutoff)
        .map(|l| l.carbon_amount_kg)
        .sum();

    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    for log in logs {
        *by_category.entry(log.category.clone()).or_default() += log.carbon_amount_kg;
    }

    CarbonStats {
        total_kg: round_to(total, 2),
        daily_average_kg: round_to(recent / DAILY_AVERAGE_WINDOW_DAYS as f64, 2),
        monthly_kg: round_to(monthly, 2),
        by_category: by_category
            .into_iter()
            .map(|(k, v)| (k, round_to(v, 2)))
            .collect(),
    }
}
