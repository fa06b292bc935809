//! API 错误类型定义
//!
//! 所有 handler、service、repository 共用同一错误类型，统一转换为 JSON 错误响应

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 系统级错误对外返回的统一提示
const INTERNAL_MESSAGE: &str = "Internal server error";

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 认证错误
    #[error("{0}")]
    Unauthorized(String),
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Inactive user")]
    InactiveUser,
    #[error("{0}")]
    Forbidden(String),

    // 账户与验证
    #[error("Email already registered")]
    EmailAlreadyRegistered,
    #[error("Invalid verification token")]
    InvalidVerificationToken,
    #[error("Verification token has expired")]
    VerificationTokenExpired,
    #[error("Email already verified")]
    EmailAlreadyVerified,

    // 业务规则
    #[error("Device must be either 'AC' or 'Refrigerator'")]
    InvalidDevice,
    #[error("Issue type must be 'Gas leak', 'Disposal', or 'Servicing'")]
    InvalidIssueType,
    #[error("Cannot remove your own admin status")]
    CannotRemoveOwnAdmin,
    #[error("Cannot delete your own account")]
    CannotDeleteSelf,

    // 参数与资源
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),

    // 系统错误
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("email delivery error: {0}")]
    Email(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,

            Self::InactiveUser
            | Self::EmailAlreadyRegistered
            | Self::InvalidVerificationToken
            | Self::VerificationTokenExpired
            | Self::EmailAlreadyVerified
            | Self::InvalidDevice
            | Self::InvalidIssueType
            | Self::CannotRemoveOwnAdmin
            | Self::CannotDeleteSelf
            | Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,

            Self::Database(_) | Self::Email(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InactiveUser => "INACTIVE_USER",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::InvalidVerificationToken => "INVALID_VERIFICATION_TOKEN",
            Self::VerificationTokenExpired => "VERIFICATION_TOKEN_EXPIRED",
            Self::EmailAlreadyVerified => "EMAIL_ALREADY_VERIFIED",
            Self::InvalidDevice => "INVALID_DEVICE",
            Self::InvalidIssueType => "INVALID_ISSUE_TYPE",
            Self::CannotRemoveOwnAdmin => "CANNOT_REMOVE_OWN_ADMIN",
            Self::CannotDeleteSelf => "CANNOT_DELETE_SELF",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Email(_) => "EMAIL_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 唯一约束冲突转换为 409，其余数据库错误原样保留
    pub fn from_unique_violation(err: sqlx::Error, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict(message.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "Database operation failed");
                INTERNAL_MESSAGE.to_string()
            }
            Self::Email(e) => {
                tracing::error!(error = %e, "Email delivery failed");
                INTERNAL_MESSAGE.to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                INTERNAL_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从 JSON 序列化错误转换
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON processing error: {}", err))
    }
}

/// 计算引擎的参数错误对外表现为 400
impl From<footprint::EngineError> for ApiError {
    fn from(err: footprint::EngineError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    /// 错误变体与 (StatusCode, error_code) 的映射表
    fn all_error_variants() -> Vec<(ApiError, StatusCode, &'static str)> {
        vec![
            (ApiError::Unauthorized("Could not validate credentials".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (ApiError::InvalidCredentials, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            (ApiError::InactiveUser, StatusCode::BAD_REQUEST, "INACTIVE_USER"),
            (ApiError::Forbidden("Admin access required".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
            (ApiError::EmailAlreadyRegistered, StatusCode::BAD_REQUEST, "EMAIL_ALREADY_REGISTERED"),
            (ApiError::InvalidVerificationToken, StatusCode::BAD_REQUEST, "INVALID_VERIFICATION_TOKEN"),
            (ApiError::VerificationTokenExpired, StatusCode::BAD_REQUEST, "VERIFICATION_TOKEN_EXPIRED"),
            (ApiError::EmailAlreadyVerified, StatusCode::BAD_REQUEST, "EMAIL_ALREADY_VERIFIED"),
            (ApiError::InvalidDevice, StatusCode::BAD_REQUEST, "INVALID_DEVICE"),
            (ApiError::InvalidIssueType, StatusCode::BAD_REQUEST, "INVALID_ISSUE_TYPE"),
            (ApiError::CannotRemoveOwnAdmin, StatusCode::BAD_REQUEST, "CANNOT_REMOVE_OWN_ADMIN"),
            (ApiError::CannotDeleteSelf, StatusCode::BAD_REQUEST, "CANNOT_DELETE_SELF"),
            (ApiError::Validation("days must be positive".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (ApiError::NotFound("User"), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (ApiError::Conflict("Badge with this name already exists".into()), StatusCode::CONFLICT, "CONFLICT"),
            (ApiError::Database(sqlx::Error::PoolTimedOut), StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            (ApiError::Email("smtp down".into()), StatusCode::INTERNAL_SERVER_ERROR, "EMAIL_ERROR"),
            (ApiError::Internal("unexpected state".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ]
    }

    #[test]
    fn test_all_variants_status_code() {
        for (error, expected_status, label) in all_error_variants() {
            assert_eq!(error.status_code(), expected_status, "status mismatch: {label}");
        }
    }

    #[test]
    fn test_all_variants_error_code() {
        for (error, _status, expected_code) in all_error_variants() {
            assert_eq!(error.error_code(), expected_code);
        }
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(ApiError::NotFound("Carbon log").to_string(), "Carbon log not found");
        assert_eq!(
            ApiError::InvalidCredentials.to_string(),
            "Incorrect email or password"
        );
        assert_eq!(
            ApiError::InvalidDevice.to_string(),
            "Device must be either 'AC' or 'Refrigerator'"
        );
        assert_eq!(
            ApiError::InvalidIssueType.to_string(),
            "Issue type must be 'Gas leak', 'Disposal', or 'Servicing'"
        );
    }

    #[test]
    fn test_engine_error_maps_to_validation() {
        let err: ApiError = footprint::check_days(0).unwrap_err().into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("days must be positive"));
    }

    #[test]
    fn test_from_unique_violation_passes_other_errors_through() {
        let err = ApiError::from_unique_violation(sqlx::Error::RowNotFound, "dup");
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_into_response_body_structure() {
        for (error, expected_status, expected_code) in all_error_variants() {
            let label = format!("{:?}", error);
            let is_system = expected_status == StatusCode::INTERNAL_SERVER_ERROR;
            let display = error.to_string();
            let response = error.into_response();

            assert_eq!(response.status(), expected_status, "{label}");

            let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("read body");
            let body: serde_json::Value = serde_json::from_slice(&body_bytes).expect("json body");

            assert_eq!(body["success"], false);
            assert_eq!(body["code"], expected_code);
            assert!(body["data"].is_null());
            if is_system {
                assert_eq!(body["message"], INTERNAL_MESSAGE);
            } else {
                assert_eq!(body["message"], display.as_str());
            }
        }
    }
}
