//! CFC 报告服务

use std::sync::Arc;

use carbon_shared::observability::metrics;
use tracing::info;
use uuid::Uuid;

use crate::dto::CreateCfcReportRequest;
use crate::error::{ApiError, Result};
use crate::models::CfcReport;
use crate::repository::CfcReportRepository;

/// 允许上报的设备
pub const REPORTABLE_DEVICES: [&str; 2] = ["AC", "Refrigerator"];

/// 允许上报的问题类型
pub const REPORTABLE_ISSUES: [&str; 3] = ["Gas leak", "Disposal", "Servicing"];

pub struct CfcService {
    reports: Arc<dyn CfcReportRepository>,
}

impl CfcService {
    pub fn new(reports: Arc<dyn CfcReportRepository>) -> Self {
        Self { reports }
    }

    pub async fn create_report(
        &self,
        user_id: Uuid,
        req: CreateCfcReportRequest,
    ) -> Result<CfcReport> {
        validate_report(&req)?;

        let report = self
            .reports
            .create(user_id, req.device, req.issue_type, req.notes)
            .await?;

        metrics::record_cfc_report(&report.device);
        info!(report_id = %report.id, device = %report.device, issue = %report.issue_type, "CFC report created");

        Ok(report)
    }

    pub async fn my_reports(&self, user_id: Uuid) -> Result<Vec<CfcReport>> {
        self.reports.list_by_user(user_id).await
    }
}

/// 设备与问题类型均为精确匹配
pub fn validate_report(req: &CreateCfcReportRequest) -> Result<()> {
    if !REPORTABLE_DEVICES.contains(&req.device.as_str()) {
        return Err(ApiError::InvalidDevice);
    }
    if !REPORTABLE_ISSUES.contains(&req.issue_type.as_str()) {
        return Err(ApiError::InvalidIssueType);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCfcReportRepository;
    use chrono::Utc;

    fn request(device: &str, issue: &str) -> CreateCfcReportRequest {
        CreateCfcReportRequest {
            device: device.to_string(),
            issue_type: issue.to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_validate_report() {
        assert!(validate_report(&request("AC", "Gas leak")).is_ok());
        assert!(validate_report(&request("Refrigerator", "Servicing")).is_ok());

        let err = validate_report(&request("Freezer", "Gas leak")).unwrap_err();
        assert_eq!(err.to_string(), "Device must be either 'AC' or 'Refrigerator'");

        // 大小写敏感
        assert!(validate_report(&request("ac", "Gas leak")).is_err());

        let err = validate_report(&request("AC", "Recycling")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Issue type must be 'Gas leak', 'Disposal', or 'Servicing'"
        );
    }

    #[tokio::test]
    async fn test_create_report_persists() {
        let user_id = Uuid::new_v4();
        let mut repo = MockCfcReportRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|user_id, device, issue_type, notes| {
                let now = Utc::now();
                Ok(CfcReport {
                    id: Uuid::new_v4(),
                    user_id,
                    device,
                    issue_type,
                    notes,
                    date: now,
                    created_at: now,
                })
            });

        let report = CfcService::new(Arc::new(repo))
            .create_report(
                user_id,
                CreateCfcReportRequest {
                    notes: Some("hissing sound".to_string()),
                    ..request("AC", "Gas leak")
                },
            )
            .await
            .unwrap();

        assert_eq!(report.user_id, user_id);
        assert_eq!(report.device, "AC");
        assert_eq!(report.notes.as_deref(), Some("hissing sound"));
    }

    #[tokio::test]
    async fn test_invalid_report_is_not_persisted() {
        let mut repo = MockCfcReportRepository::new();
        repo.expect_create().never();

        let err = CfcService::new(Arc::new(repo))
            .create_report(Uuid::new_v4(), request("TV", "Gas leak"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidDevice));
    }
}
