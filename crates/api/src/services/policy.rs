//! Client for the external allotment policy service.
//!
//! The service receives a snapshot of vacant rooms and waiting students and
//! proposes assignments. It decides nothing on its own: every proposal is
//! applied through the normal allotment path, which re-checks eligibility.

use std::time::Duration;

use async_trait::async_trait;
use campus_core::errors::{CampusError, CampusResult};
use campus_core::models::allotment::{PolicyRequest, PolicyResponse};

#[async_trait]
pub trait AllotmentPolicy: Send + Sync {
    async fn allocate(&self, request: PolicyRequest) -> CampusResult<PolicyResponse>;
}

/// Calls `POST {base_url}/allocate` with a JSON [`PolicyRequest`].
pub struct HttpPolicyClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl HttpPolicyClient {
    pub fn new(base_url: Option<String>, timeout: Duration) -> eyre::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl AllotmentPolicy for HttpPolicyClient {
    async fn allocate(&self, request: PolicyRequest) -> CampusResult<PolicyResponse> {
        let base_url = self.base_url.as_deref().ok_or_else(|| {
            CampusError::Unavailable("Allotment policy service is not configured".to_string())
        })?;
        let url = format!("{}/allocate", base_url.trim_end_matches('/'));

        tracing::info!(
            "Requesting allocation for {} student(s) across {} room(s)",
            request.students.len(),
            request.rooms.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CampusError::Upstream(format!("Allotment policy service unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CampusError::Upstream(format!(
                "Allotment policy service responded with {}",
                status
            )));
        }

        response.json::<PolicyResponse>().await.map_err(|e| {
            CampusError::Upstream(format!("Allotment policy service sent an invalid response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_client_is_unavailable() {
        let client = HttpPolicyClient::new(None, Duration::from_secs(1)).unwrap();

        let err = client
            .allocate(PolicyRequest {
                year: 2025,
                rooms: Vec::new(),
                students: Vec::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CampusError::Unavailable(_)));
    }
}
