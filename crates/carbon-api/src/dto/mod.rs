//! DTO 模块
//!
//! 包含所有请求和响应的数据传输对象

pub mod request;
pub mod response;

pub use request::{
    AdminRecordQuery, AdminUserQuery, CalculateRequest, CreateBadgeRequest,
    CreateCarbonLogRequest, CreateCfcReportRequest, CreateChallengeRequest,
    CreateRecyclingPointRequest, DaysQuery, LeaderboardQuery, LogListQuery, LoginRequest,
    MonthlyReportQuery, RecyclingPointsQuery, RegisterRequest, SuggestionQuery,
    UpdateBadgeRequest, UpdateChallengeRequest, UpdateRecyclingPointRequest, UpdateUserRequest,
    VerifyEmailQuery, WeeklyReportQuery,
};

pub use response::{
    AdminUserDto, ApiResponse, CarbonLogCreated, CarbonStats, ChallengeDto, DailyTipResponse,
    LeaderboardEntry, LogListResponse, MessageResponse, NearbyRecyclingPoint, Pagination,
    RecyclingTips, TokenResponse, UserResponse, VerificationSentResponse,
};
