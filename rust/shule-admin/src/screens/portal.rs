use crate::model::PerformanceReport;
use anyhow::{Context, Result};
use shule_sdk::{form::ValidationErrors, get_as, ClientError, Transport};
use std::sync::Arc;

/// Student-facing portal reads. Performance is looked up by admission
/// number, not by session identity, so a guardian with the number can
/// check it too.
pub struct PortalScreen {
    transport: Arc<dyn Transport>,
}

impl PortalScreen {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn performance(
        &self,
        admission_no: &str,
        level: &str,
    ) -> Result<PerformanceReport> {
        if admission_no.trim().is_empty() {
            let mut errors = ValidationErrors::default();
            errors.insert("admission_no", "Please enter an admission number");
            return Err(ClientError::ValidationFailed(errors).into());
        }

        let path = format!(
            "/api/performance?admissionNo={}&level={}",
            urlencoding::encode(admission_no),
            urlencoding::encode(level),
        );
        get_as(&*self.transport, &path)
            .await
            .context("loading performance report")
    }
}
