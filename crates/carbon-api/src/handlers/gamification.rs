//! 游戏化 API 处理器（公开）

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;

use crate::{
    dto::{ApiResponse, ChallengeDto, LeaderboardEntry, LeaderboardQuery},
    error::ApiError,
    models::Badge,
    state::AppState,
};

/// 排行榜最大条数
const MAX_LEADERBOARD_LIMIT: i64 = 100;

/// 全部徽章
///
/// GET /api/v1/gamification/badges
pub async fn badges(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Badge>>>, ApiError> {
    let badges = state.repos.badges.list().await?;
    Ok(Json(ApiResponse::success(badges)))
}

/// 排行榜：积分降序，同分按生态评分降序
///
/// GET /api/v1/gamification/leaderboard
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntry>>>, ApiError> {
    let limit = query.limit.clamp(1, MAX_LEADERBOARD_LIMIT);
    let users = state.repos.users.leaderboard(limit).await?;

    let entries = users
        .into_iter()
        .enumerate()
        .map(|(idx, user)| LeaderboardEntry {
            user_id: user.id,
            name: user.name,
            avatar_url: user.avatar_url,
            eco_score: user.eco_score,
            total_points: user.total_points,
            level: user.level,
            rank: idx + 1,
        })
        .collect();

    Ok(Json(ApiResponse::success(entries)))
}

/// 进行中的挑战，数据库中没有时返回内置挑战
///
/// GET /api/v1/gamification/challenges
pub async fn challenges(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ChallengeDto>>>, ApiError> {
    let active = state.repos.challenges.list_active(Utc::now()).await?;

    let challenges = if active.is_empty() {
        vec![ChallengeDto::carbon_free_week()]
    } else {
        active.into_iter().map(ChallengeDto::from).collect()
    };

    Ok(Json(ApiResponse::success(challenges)))
}
